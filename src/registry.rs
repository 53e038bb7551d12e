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

use crate::argument::Argument;
use crate::error::*;
use log::debug;
use std::collections::BTreeMap;

/// Registry is the set of Arguments bound for a single record, keyed (and
/// iterated) by long name.
#[derive(Debug, Default)]
pub struct Registry<'a> {
    arguments: BTreeMap<String, Argument<'a>>,
}

impl<'a> Registry<'a> {
    /// Constructs a new, empty Registry.
    pub fn new() -> Self {
        Registry {
            arguments: BTreeMap::new(),
        }
    }

    /// Add the given Argument. Long names and short flags must both be unique
    /// within a Registry.
    pub fn register(&mut self, argument: Argument<'a>) -> Result<()> {
        if self.arguments.contains_key(argument.name()) {
            return Err(Error::DuplicateName(argument.name().to_owned()));
        }
        if let Some(flag) = argument.flag() {
            if let Some(existing) = self.find_by_flag(flag) {
                return Err(Error::InvalidFlag(format!(
                    "-{} (already bound to {})",
                    flag,
                    existing.long()
                )));
            }
        }

        debug!("Registered {}", argument);
        self.arguments.insert(argument.name().to_owned(), argument);
        Ok(())
    }

    /// Look up an Argument by its long name.
    pub fn get(&self, name: &str) -> Option<&Argument<'a>> {
        self.arguments.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Argument<'a>> {
        self.arguments.get_mut(name)
    }

    /// Look up an Argument by its short flag.
    pub fn find_by_flag(&self, flag: char) -> Option<&Argument<'a>> {
        self.arguments.values().find(|a| a.flag() == Some(flag))
    }

    pub(crate) fn find_by_flag_mut(&mut self, flag: char) -> Option<&mut Argument<'a>> {
        self.arguments.values_mut().find(|a| a.flag() == Some(flag))
    }

    /// Returns an Iterator over the Arguments, sorted by long name.
    pub fn iter(&self) -> impl Iterator<Item = &Argument<'a>> {
        self.arguments.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Argument<'a>> {
        self.arguments.values_mut()
    }

    /// Returns the number of Arguments registered.
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    /// Returns true if no Arguments have been registered.
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}
