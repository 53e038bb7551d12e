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
use crate::error::*;
use crate::value::{Coercer, Kind, Value, ValueResult};
use std::fmt;

/// The short flag reserved for requesting help.
pub(crate) const HELP_FLAG: char = 'h';
/// The long name reserved for requesting help.
pub(crate) const HELP_NAME: &str = "help";

/// If the given string is a short flag like "-x", return the "x".
pub(crate) fn as_flag(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('-'), Some(c), None) if c.is_ascii_alphabetic() => Some(c),
        _ => None,
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('-') && !name.contains(char::is_whitespace)
}

/// An Argument is a single bound command-line flag: how it is spelled, where
/// its value goes, and what happens if the user leaves it out.
pub struct Argument<'a> {
    /// The optional short form, e.g. 'n' for "-n".
    flag: Option<char>,
    /// The long form, e.g. "name" for "--name". Never empty.
    name: String,
    /// Where parsed values are written.
    destination: Box<dyn Destination + 'a>,
    /// The coercion function for the destination's Kind, looked up once.
    coercer: Coercer,
    /// Whether it is an error for this flag to end up without a value.
    required: bool,
    /// The value to fall back to if the flag isn't given on the command line.
    default_value: Option<Value>,
    help: String,
    /// Set once the command line has written this Argument's destination.
    supplied: bool,
}

/// Parse an Argument from the given tag string, binding it to the given
/// destination. A tag is a ';'-separated list of fragments:
///
/// - `-x`: the short flag.
/// - `--name`: the long name (mandatory).
/// - `required`: the flag must end up with a value.
/// - `default=<literal>`: the default, parsed as the destination's type.
/// - `help=<text>`: free-form help text.
///
/// Later fragments overwrite earlier ones. Empty fragments are ignored, and
/// surrounding whitespace is ignored everywhere except at the end of help text.
pub fn parse_argument<'a>(tag: &str, destination: Box<dyn Destination + 'a>) -> Result<Argument<'a>> {
    let coercer = destination.kind().coercer();
    let mut argument = Argument {
        flag: None,
        name: String::new(),
        destination: destination,
        coercer: coercer,
        required: false,
        default_value: None,
        help: String::new(),
        supplied: false,
    };

    for fragment in tag.split(';').map(str::trim_start) {
        let fragment = match fragment.starts_with("help=") {
            false => fragment.trim_end(),
            true => fragment,
        };
        if !fragment.is_empty() {
            argument.parse_fragment(fragment)?;
        }
    }

    argument.validate()?;
    Ok(argument)
}

impl<'a> Argument<'a> {
    fn parse_fragment(&mut self, fragment: &str) -> Result<()> {
        if let Some(name) = fragment.strip_prefix("--") {
            if !is_valid_name(name) {
                return Err(Error::InvalidName(name.to_owned()));
            }
            self.name = name.to_owned();
        } else if fragment.starts_with('-') {
            match as_flag(fragment) {
                None => return Err(Error::InvalidFlag(fragment.to_owned())),
                Some(flag) => self.flag = Some(flag),
            }
        } else if fragment == "required" {
            self.required = true;
        } else if let Some(literal) = fragment.strip_prefix("default=") {
            self.default_value = Some((self.coercer)(literal)?);
        } else if let Some(help) = fragment.strip_prefix("help=") {
            self.help = help.to_owned();
        } else {
            return Err(Error::UnknownArgumentTag(fragment.to_owned()));
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidName(self.name.clone()));
        }
        if self.name == HELP_NAME {
            return Err(Error::InvalidName(format!("{} (reserved)", self.name)));
        }
        if self.flag == Some(HELP_FLAG) {
            return Err(Error::InvalidFlag(format!("-{} (reserved)", HELP_FLAG)));
        }
        Ok(())
    }

    /// Returns this Argument's short flag, if it has one.
    pub fn flag(&self) -> Option<char> {
        self.flag
    }

    /// Returns this Argument's long name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the human-readable help text for this Argument.
    pub fn help(&self) -> &str {
        self.help.as_str()
    }

    /// Returns whether this Argument must end up with a value.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the default value declared in this Argument's tag, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Returns the Kind of this Argument's destination.
    pub fn kind(&self) -> Kind {
        self.destination.kind()
    }

    /// Boolean Arguments are switches; they never consume a value token.
    pub fn is_boolean(&self) -> bool {
        self.kind().is_boolean()
    }

    /// Returns the value currently held by this Argument's destination.
    pub fn value(&self) -> Value {
        self.destination.get()
    }

    /// Returns whether the command line has set this Argument's value.
    pub fn was_supplied(&self) -> bool {
        self.supplied
    }

    /// "-x", if this Argument has a short flag.
    pub fn short(&self) -> Option<String> {
        self.flag.map(|f| format!("-{}", f))
    }

    /// "--name".
    pub fn long(&self) -> String {
        format!("--{}", self.name)
    }

    /// The placeholder used for this Argument's value in usage messages.
    pub fn placeholder(&self) -> String {
        self.name.to_uppercase()
    }

    /// Coerce the given literal and write it to the destination.
    pub(crate) fn set_literal(&mut self, literal: &str) -> ValueResult<()> {
        let value = (self.coercer)(literal)?;
        self.destination.set(value)?;
        self.supplied = true;
        Ok(())
    }

    /// Flip a boolean Argument away from its default (false, if it has none).
    pub(crate) fn toggle(&mut self) -> ValueResult<()> {
        let default = match self.default_value {
            Some(Value::Bool(b)) => b,
            _ => false,
        };
        self.destination.set(Value::Bool(!default))?;
        self.supplied = true;
        Ok(())
    }

    /// Write the default value through, if there is one and the destination is
    /// still untouched. Returns whether anything was written.
    ///
    /// A value supplied on the command line always beats the default, even if
    /// it is the zero value: `-a 0` leaves 0 in place rather than applying
    /// `default=18`.
    pub(crate) fn apply_default(&mut self) -> ValueResult<bool> {
        if self.supplied || !self.destination.is_zero() {
            return Ok(false);
        }
        match self.default_value {
            None => Ok(false),
            Some(ref default_value) => {
                self.destination.set(default_value.clone())?;
                Ok(true)
            }
        }
    }

    /// An Argument is satisfied once its destination holds something other
    /// than the zero value. Supplying the zero value explicitly doesn't count.
    pub(crate) fn is_satisfied(&self) -> bool {
        !self.destination.is_zero()
    }

    pub(crate) fn reset(&mut self) {
        self.supplied = false;
    }
}

impl<'a> fmt::Debug for Argument<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Argument")
            .field("flag", &self.flag)
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("required", &self.required)
            .field("default_value", &self.default_value)
            .field("help", &self.help)
            .field("supplied", &self.supplied)
            .finish()
    }
}

impl<'a> fmt::Display for Argument<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Argument{{{}", self.name)?;
        if let Some(flag) = self.flag {
            write!(f, "[{}]", flag)?;
        }
        write!(f, " = {}", self.value())?;
        if self.required {
            f.write_str(" (*)")?;
        }
        if let Some(ref default_value) = self.default_value {
            write!(f, " [{}]", default_value)?;
        }
        f.write_str("}")
    }
}
