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


use log::info;
use std::time::Duration;
use tagflags::value::format_duration;
use tagflags::{Parser, Record, Result};

#[derive(Debug, Default)]
struct Person {
    name: String,
    max_age: i32,
    gender: bool,
    latency: Duration,
}

impl Record for Person {
    fn bind<'a>(&'a mut self, parser: &mut Parser<'a>) -> Result<()> {
        parser.bind("-n;--name;required;help=name of the person", &mut self.name)?;
        parser.bind("-a;--max-age;default=18;help=and, the age", &mut self.max_age)?;
        parser.bind("--gender;default=true;help=hello boys and girls", &mut self.gender)?;
        parser.bind(
            "-L;--latency;default=3m59s200ms;help=no actually meaning",
            &mut self.latency,
        )?;
        Ok(())
    }
}

fn main() {
    let mut person = Person::default();
    tagflags::main_impl(&mut person);

    info!("Parsed {:?}", person);
    println!(
        "name={} max_age={} gender={} latency={}",
        person.name,
        person.max_age,
        person.gender,
        format_duration(&person.latency)
    );
}
