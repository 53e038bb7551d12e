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


use crate::help::help_message;
use crate::parser::Parser;
use crate::registry::Registry;
use std::time::Duration;

#[test]
fn test_help_message_no_arguments() {
    crate::init().unwrap();

    assert_eq!(
        "Usage: test [-h]\n\n  -h,--help  show this message and exit",
        help_message("test", &Registry::new())
    );
}

#[test]
fn test_help_message() {
    crate::init().unwrap();

    let mut name = String::new();
    let mut max_age: i32 = 0;
    let mut gender = false;
    let mut latency = Duration::from_secs(0);
    let mut parser = Parser::new("test").unwrap();
    parser
        .bind("-n;--name;required;help=name of the person", &mut name)
        .unwrap();
    parser
        .bind("-a;--max-age;default=18;help=and, the age", &mut max_age)
        .unwrap();
    parser
        .bind("--gender;default=true;help=hello boys and girls", &mut gender)
        .unwrap();
    parser
        .bind(
            "-L;--latency;default=3m59s200ms;help=no actually meaning",
            &mut latency,
        )
        .unwrap();

    let expected = concat!(
        "Usage: test [-h] [--gender] [-L|--latency LATENCY] [-a|--max-age MAX-AGE] ",
        "-n|--name NAME\n",
        "\n",
        "  -h,--help             show this message and exit\n",
        "     --gender           hello boys and girls [default: true]\n",
        "  -L,--latency LATENCY  no actually meaning [default: 3m59.2s]\n",
        "  -a,--max-age MAX-AGE  and, the age [default: 18]\n",
        "  -n,--name NAME        name of the person"
    );
    assert_eq!(expected, parser.help_message());
    assert_eq!(expected, help_message("test", parser.registry()));
}

#[test]
fn test_help_message_without_help_text() {
    crate::init().unwrap();

    let mut quiet = false;
    let mut output = String::new();
    let mut parser = Parser::new("cc").unwrap();
    parser.bind("--quiet", &mut quiet).unwrap();
    parser.bind("-o;--output;default=a.out", &mut output).unwrap();

    let expected = concat!(
        "Usage: cc [-h] [-o|--output OUTPUT] [--quiet]\n",
        "\n",
        "  -h,--help           show this message and exit\n",
        "  -o,--output OUTPUT  [default: a.out]\n",
        "     --quiet"
    );
    assert_eq!(expected, parser.help_message());
}

#[test]
fn test_help_message_is_deterministic() {
    crate::init().unwrap();

    let mut a = String::new();
    let mut b = String::new();
    let mut first = Parser::new("test").unwrap();
    first.bind("-a;--apple", &mut a).unwrap();
    first.bind("-b;--banana;required", &mut b).unwrap();

    let mut c = String::new();
    let mut d = String::new();
    let mut second = Parser::new("test").unwrap();
    second.bind("-b;--banana;required", &mut d).unwrap();
    second.bind("-a;--apple", &mut c).unwrap();

    assert_eq!(first.help_message(), second.help_message());
}
