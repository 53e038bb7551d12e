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

use crate::value::{FlagValue, Kind, Value, ValueResult};

/// A Destination is somewhere a flag's value gets written to - normally a
/// single field of the caller's record. An Argument holds exactly one, and is
/// its only writer for as long as the Argument lives.
pub trait Destination {
    /// The Kind of value this destination holds. This never changes.
    fn kind(&self) -> Kind;

    /// Whether the destination currently holds its type's zero value.
    fn is_zero(&self) -> bool;

    /// Read the current value.
    fn get(&self) -> Value;

    /// Overwrite the current value. Fails if the Value is of the wrong Kind.
    fn set(&mut self, value: Value) -> ValueResult<()>;
}

/// Any mutable reference to a supported type is a Destination, which is what
/// makes `parser.bind("--name", &mut record.name)` work.
impl<'a, T: FlagValue> Destination for &'a mut T {
    fn kind(&self) -> Kind {
        T::KIND
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn get(&self) -> Value {
        (**self).to_value()
    }

    fn set(&mut self, value: Value) -> ValueResult<()> {
        **self = T::from_value(value)?;
        Ok(())
    }
}
