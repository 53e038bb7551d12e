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
use crate::main_impl::*;
use crate::parser::*;

#[derive(Debug, Default)]
struct Args {
    host: String,
    port: u16,
}

impl Record for Args {
    fn bind<'a>(&'a mut self, parser: &mut Parser<'a>) -> Result<()> {
        parser.bind("-H;--host;required;help=server to connect to", &mut self.host)?;
        parser.bind("-p;--port;default=8080", &mut self.port)?;
        Ok(())
    }
}

struct BadArgs {
    value: String,
}

impl Record for BadArgs {
    fn bind<'a>(&'a mut self, parser: &mut Parser<'a>) -> Result<()> {
        parser.bind("--value;sometimes", &mut self.value)
    }
}

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|&arg| arg.to_owned()).collect()
}

fn usage() -> String {
    let mut args = Args::default();
    let mut parser = Parser::new("client").unwrap();
    args.bind(&mut parser).unwrap();
    parser.help_message()
}

#[test]
fn test_parse_into_success() {
    crate::init().unwrap();

    let mut args = Args::default();
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    assert_eq!(
        None,
        parse_into(
            &mut args,
            "client",
            &to_args(&["--host", "localhost"]),
            &mut out,
            &mut err
        )
    );
    assert_eq!("localhost", args.host);
    assert_eq!(8080, args.port);
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn test_parse_into_help() {
    crate::init().unwrap();

    let mut args = Args::default();
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    assert_eq!(
        Some(EXIT_SUCCESS),
        parse_into(&mut args, "client", &to_args(&["-h"]), &mut out, &mut err)
    );
    assert_eq!(format!("{}\n", usage()), String::from_utf8(out).unwrap());
    assert!(err.is_empty());
    assert_eq!("", args.host);
}

#[test]
fn test_parse_into_error() {
    crate::init().unwrap();

    let mut args = Args::default();
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    assert_eq!(
        Some(EXIT_FAILURE),
        parse_into(
            &mut args,
            "client",
            &to_args(&["-p", "99999", "-H", "x"]),
            &mut out,
            &mut err
        )
    );
    assert!(out.is_empty());
    let err = String::from_utf8(err).unwrap();
    assert!(err.starts_with("Error parsing command-line flags: invalid value for \"-p\": "));
    assert!(err.ends_with(&format!("\n\n{}\n", usage())));
}

#[test]
fn test_parse_into_missing_required() {
    crate::init().unwrap();

    let mut args = Args::default();
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    assert_eq!(
        Some(EXIT_FAILURE),
        parse_into(&mut args, "client", &[], &mut out, &mut err)
    );
    let err = String::from_utf8(err).unwrap();
    assert!(err.starts_with(
        "Error parsing command-line flags: missing required argument \"host\"\n\nUsage: client "
    ));
}

#[test]
#[should_panic(expected = "Invalid flag declarations for client")]
fn test_parse_into_bad_declarations() {
    crate::init().unwrap();

    let mut args = BadArgs {
        value: String::new(),
    };
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    parse_into(&mut args, "client", &[], &mut out, &mut err);
}

#[test]
fn test_handle_result() {
    crate::init().unwrap();

    let parser = Parser::new("empty").unwrap();
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    assert_eq!(
        Some(EXIT_FAILURE),
        handle_result(
            Err(Error::UnknownArgumentTag("--x".to_owned())),
            &parser,
            &mut out,
            &mut err
        )
    );
    assert_eq!(
        "Error parsing command-line flags: unknown argument tag \"--x\"\n\n\
         Usage: empty [-h]\n\n  -h,--help  show this message and exit\n",
        String::from_utf8(err).unwrap()
    );
    assert!(out.is_empty());
}
