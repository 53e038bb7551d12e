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


use crate::argument::parse_argument;
use crate::error::*;
use crate::registry::Registry;

#[test]
fn test_register_and_lookup() {
    crate::init().unwrap();

    let mut name = String::new();
    let mut age: u32 = 0;
    let mut verbose = false;
    let mut registry = Registry::new();
    assert!(registry.is_empty());

    registry
        .register(parse_argument("-n;--name", Box::new(&mut name)).unwrap())
        .unwrap();
    registry
        .register(parse_argument("--verbose", Box::new(&mut verbose)).unwrap())
        .unwrap();
    registry
        .register(parse_argument("-a;--age", Box::new(&mut age)).unwrap())
        .unwrap();
    assert_eq!(3, registry.len());
    assert!(!registry.is_empty());

    assert_eq!("name", registry.find_by_flag('n').unwrap().name());
    assert_eq!("age", registry.find_by_flag('a').unwrap().name());
    assert!(registry.find_by_flag('v').is_none());
    assert_eq!(Some('n'), registry.get("name").unwrap().flag());
    assert!(registry.get("verbose").unwrap().is_boolean());
    assert!(registry.get("nope").is_none());
}

#[test]
fn test_iteration_is_sorted_by_name() {
    crate::init().unwrap();

    let mut a = String::new();
    let mut b = String::new();
    let mut c = String::new();
    let mut registry = Registry::new();
    registry
        .register(parse_argument("--zeta", Box::new(&mut a)).unwrap())
        .unwrap();
    registry
        .register(parse_argument("--alpha", Box::new(&mut b)).unwrap())
        .unwrap();
    registry
        .register(parse_argument("--mu", Box::new(&mut c)).unwrap())
        .unwrap();

    let names: Vec<&str> = registry.iter().map(|a| a.name()).collect();
    assert_eq!(vec!["alpha", "mu", "zeta"], names);
}

#[test]
fn test_duplicate_name() {
    crate::init().unwrap();

    let mut a = String::new();
    let mut b: i8 = 0;
    let mut registry = Registry::new();
    registry
        .register(parse_argument("-a;--name", Box::new(&mut a)).unwrap())
        .unwrap();
    match registry.register(parse_argument("-b;--name", Box::new(&mut b)).unwrap()) {
        Err(Error::DuplicateName(name)) => assert_eq!("name", name),
        r => panic!("expected DuplicateName, got {:?}", r),
    }
    assert_eq!(1, registry.len());
}

#[test]
fn test_duplicate_flag() {
    crate::init().unwrap();

    let mut a = String::new();
    let mut b = String::new();
    let mut registry = Registry::new();
    registry
        .register(parse_argument("-x;--first", Box::new(&mut a)).unwrap())
        .unwrap();
    match registry.register(parse_argument("-x;--second", Box::new(&mut b)).unwrap()) {
        Err(Error::InvalidFlag(message)) => {
            assert_eq!("-x (already bound to --first)", message)
        }
        r => panic!("expected InvalidFlag, got {:?}", r),
    }
    assert!(registry.get("second").is_none());
}
