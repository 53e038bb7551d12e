// Copyright 2015 Axel Rasmussen
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::argument::{Argument, HELP_FLAG, HELP_NAME};
use crate::registry::Registry;

const HELP_HELP: &str = "show this message and exit";

// How an Argument appears in the one-line synopsis, e.g. "[-a|--age AGE]".
fn synopsis_entry(argument: &Argument) -> String {
    let mut entry = match argument.short() {
        Some(short) => format!("{}|{}", short, argument.long()),
        None => argument.long(),
    };
    if !argument.is_boolean() {
        entry.push(' ');
        entry.push_str(&argument.placeholder());
    }
    match argument.is_required() {
        false => format!("[{}]", entry),
        true => entry,
    }
}

// The left-hand column of an Argument's detail line. Long-only Arguments are
// indented so all of the "--" line up.
fn detail_prefix(argument: &Argument) -> String {
    let mut prefix = match argument.short() {
        Some(short) => format!("{},{}", short, argument.long()),
        None => format!("   {}", argument.long()),
    };
    if !argument.is_boolean() {
        prefix.push(' ');
        prefix.push_str(&argument.placeholder());
    }
    prefix
}

fn detail_help(argument: &Argument) -> String {
    let mut help = argument.help().to_owned();
    if let Some(default_value) = argument.default_value() {
        if !help.is_empty() {
            help.push(' ');
        }
        help.push_str(&format!("[default: {}]", default_value));
    }
    help
}

/// Render the usage message for the given program and its Arguments. The
/// output is a synopsis line followed by one aligned line per Argument, both
/// sorted by long name, and is entirely determined by the Registry's contents.
pub fn help_message(program: &str, registry: &Registry) -> String {
    let mut synopsis = vec![format!("[-{}]", HELP_FLAG)];
    let mut details = vec![(format!("-{},--{}", HELP_FLAG, HELP_NAME), HELP_HELP.to_owned())];
    for argument in registry.iter() {
        synopsis.push(synopsis_entry(argument));
        details.push((detail_prefix(argument), detail_help(argument)));
    }

    let width = details
        .iter()
        .map(|(prefix, _)| prefix.chars().count())
        .max()
        .unwrap_or(0);
    let details: Vec<String> = details
        .iter()
        .map(|(prefix, help)| {
            format!("  {:<width$}  {}", prefix, help, width = width)
                .trim_end()
                .to_owned()
        })
        .collect();

    format!(
        "Usage: {} {}\n\n{}",
        program,
        synopsis.join(" "),
        details.join("\n")
    )
}
