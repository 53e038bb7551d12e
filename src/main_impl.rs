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

use crate::error::*;
use crate::parser::{ParseOutcome, Parser, Record};
use std::env;
use std::io::{self, Write};
use std::process;

/// The integer which is returned from main() if the program exits successfully.
pub(crate) const EXIT_SUCCESS: i32 = 0;
/// The integer which is returned from main() if the program exits with any
/// error.
pub(crate) const EXIT_FAILURE: i32 = 1;

/// Returns the current program's parameters (accessed essentialy via
/// `std::env::args`) collected into a Vec. The 0'th parameter (the executable)
/// is omitted.
pub(crate) fn get_program_parameters() -> Vec<String> {
    env::args()
        .skip(1) // Skip the first argument, which is our executable.
        .collect()
}

fn get_program_name() -> String {
    env::args()
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned())
}

/// Decide what the process should do after parsing. None means parsing
/// succeeded and the program should carry on; otherwise, the help message or
/// the error (followed by usage) has been written, and the process should exit
/// with the returned code.
pub(crate) fn handle_result<O: Write, E: Write>(
    r: Result<ParseOutcome>,
    parser: &Parser,
    out: &mut O,
    err: &mut E,
) -> Option<i32> {
    match r {
        Ok(ParseOutcome::Parsed) => None,
        Ok(ParseOutcome::Help(message)) => Some(match writeln!(out, "{}", message) {
            Ok(()) => EXIT_SUCCESS,
            Err(_) => EXIT_FAILURE,
        }),
        Err(e) => {
            // Nothing sensible left to do if stderr is gone.
            let _ = writeln!(
                err,
                "Error parsing command-line flags: {}\n\n{}",
                e,
                parser.help_message()
            );
            Some(EXIT_FAILURE)
        }
    }
}

/// Bind the given record and parse the given arguments into it, writing help
/// or errors to the given writers. See `handle_result` for the return value.
///
/// Binding errors mean the record's own tags are broken, so they panic. So
/// does an empty program name.
pub(crate) fn parse_into<R: Record, O: Write, E: Write>(
    record: &mut R,
    program: &str,
    args: &[String],
    out: &mut O,
    err: &mut E,
) -> Option<i32> {
    let mut parser = match Parser::new(program) {
        Ok(parser) => parser,
        Err(e) => panic!("Invalid parser for '{}': {}", program, e),
    };
    if let Err(e) = record.bind(&mut parser) {
        panic!("Invalid flag declarations for {}: {}", program, e);
    }
    let r = parser.parse(args);
    handle_result(r, &parser, out, err)
}

/// Parses this process' command-line arguments into the given record.
///
/// This function only returns if parsing succeeded. If help was requested it
/// is printed to standard output and the process exits successfully; if the
/// arguments were invalid the error and usage are printed to standard error,
/// and the process exits with a failure code. Like `std::process::exit`, no
/// destructors on any stack are run in those cases.
pub fn main_impl<R: Record>(record: &mut R) {
    if let Err(e) = crate::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let program = get_program_name();
    let args = get_program_parameters();
    if let Some(code) = parse_into(
        record,
        &program,
        &args,
        &mut io::stdout(),
        &mut io::stderr(),
    ) {
        process::exit(code);
    }
}
