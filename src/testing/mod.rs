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

use crate::destination::Destination;
use crate::value::{Kind, Value, ValueError, ValueResult};
use std::sync::Mutex;

/// A Recorder stands in for a record field in tests. It remembers every value
/// written to it, in order, so a test can check not just the final value but
/// whether (and how often) the parser wrote it at all. Because it has internal
/// synchronization, this works without holding a mutable reference.
pub struct Recorder {
    kind: Kind,
    writes: Mutex<Vec<Value>>,
}

impl Recorder {
    /// Construct a new Recorder for values of the given Kind, with no writes
    /// recorded.
    pub fn new(kind: Kind) -> Recorder {
        Recorder {
            kind: kind,
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Returns a Destination which records into this Recorder, suitable for
    /// `Parser::bind_destination`.
    pub fn destination(&self) -> Box<dyn Destination + '_> {
        Box::new(RecordingDestination { recorder: self })
    }

    /// Returns every value written so far, oldest first.
    pub fn get_writes(&self) -> Vec<Value> {
        self.writes.lock().unwrap().clone()
    }

    /// Returns the number of writes recorded.
    pub fn get_write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    /// Returns the most recently written value, or the Kind's zero value if
    /// nothing has been written.
    pub fn get_value(&self) -> Value {
        self.writes
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_else(|| self.kind.zero())
    }
}

struct RecordingDestination<'r> {
    recorder: &'r Recorder,
}

impl<'r> Destination for RecordingDestination<'r> {
    fn kind(&self) -> Kind {
        self.recorder.kind
    }

    fn is_zero(&self) -> bool {
        self.recorder.get_value() == self.recorder.kind.zero()
    }

    fn get(&self) -> Value {
        self.recorder.get_value()
    }

    fn set(&mut self, value: Value) -> ValueResult<()> {
        if value.kind() != self.recorder.kind {
            return Err(ValueError::InvalidType {
                expected: self.recorder.kind,
                found: value.kind(),
            });
        }
        self.recorder.writes.lock().unwrap().push(value);
        Ok(())
    }
}
