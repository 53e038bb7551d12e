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

use crate::argument::{as_flag, parse_argument, Argument, HELP_FLAG, HELP_NAME};
use crate::destination::Destination;
use crate::error::*;
use crate::help;
use crate::registry::Registry;
use crate::value::FlagValue;
use log::{debug, trace};

/// The result of a successful parse.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseOutcome {
    /// Every token was consumed, defaults were applied, and all required
    /// Arguments have values.
    Parsed,
    /// "-h" or "--help" appeared somewhere in the arguments. Nothing was bound;
    /// the rendered usage message is returned for the caller to print.
    Help(String),
}

/// A Record is a structure which knows how to bind its own fields to a Parser.
/// Implementing this is the usual way to describe a program's flags once:
///
/// ```
/// use tagflags::{Parser, Record, Result};
///
/// #[derive(Default)]
/// struct Args {
///     name: String,
///     verbose: bool,
/// }
///
/// impl Record for Args {
///     fn bind<'a>(&'a mut self, parser: &mut Parser<'a>) -> Result<()> {
///         parser.bind("-n;--name;required;help=who to greet", &mut self.name)?;
///         parser.bind("-v;--verbose", &mut self.verbose)?;
///         Ok(())
///     }
/// }
///
/// let mut args = Args::default();
/// tagflags::parse_record("greet", &mut args, &["--name", "world", "-v"]).unwrap();
/// assert_eq!("world", args.name);
/// assert!(args.verbose);
/// ```
pub trait Record {
    /// Bind each of this record's flag fields, via `Parser::bind`.
    fn bind<'a>(&'a mut self, parser: &mut Parser<'a>) -> Result<()>;
}

// The token matcher is either looking for the next flag, or it has just seen a
// non-boolean flag and the next token is that flag's value.
enum State<'t> {
    Scanning,
    ConsumingValue { token: &'t str, name: String },
}

fn help_requested<S: AsRef<str>>(args: &[S]) -> bool {
    let short = format!("-{}", HELP_FLAG);
    let long = format!("--{}", HELP_NAME);
    args.iter()
        .map(|arg| arg.as_ref())
        .any(|arg| arg == short || arg == long)
}

/// Parser binds command-line flags into a single flat record. Arguments are
/// bound first (each holding a `&mut` into one field), then `parse` walks the
/// command line once, writing values straight through.
#[derive(Debug)]
pub struct Parser<'a> {
    program: String,
    registry: Registry<'a>,
}

impl<'a> Parser<'a> {
    /// Constructs a new Parser with no Arguments. The program name is only used
    /// in usage messages, but it must not be empty.
    pub fn new(program: &str) -> Result<Self> {
        if program.is_empty() {
            return Err(Error::InvalidArgument(
                "parser program name must not be empty".to_owned(),
            ));
        }
        Ok(Parser {
            program: program.to_owned(),
            registry: Registry::new(),
        })
    }

    /// Returns the program name given to `new`.
    pub fn program(&self) -> &str {
        self.program.as_str()
    }

    /// Returns the Arguments bound so far.
    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    /// Bind a new Argument, described by the given tag, to the given field.
    ///
    /// Any error here means the tag (or the combination of tags bound to this
    /// Parser) is malformed, which is a bug in the calling program rather than
    /// something the user did.
    pub fn bind<T: FlagValue + 'a>(&mut self, tag: &str, destination: &'a mut T) -> Result<()> {
        self.bind_destination(tag, Box::new(destination))
    }

    /// Like `bind`, but for an arbitrary Destination implementation.
    pub fn bind_destination(
        &mut self,
        tag: &str,
        destination: Box<dyn Destination + 'a>,
    ) -> Result<()> {
        let argument = parse_argument(tag, destination)?;
        self.registry.register(argument)
    }

    /// Render the usage message for this Parser's Arguments.
    pub fn help_message(&self) -> String {
        help::help_message(&self.program, &self.registry)
    }

    /// Parse the given command-line arguments (not including the program name)
    /// into the bound destinations.
    ///
    /// If "-h" or "--help" appears anywhere, nothing is bound and the usage
    /// message is returned instead, regardless of what else is in `args`.
    pub fn parse<S: AsRef<str>>(&mut self, args: &[S]) -> Result<ParseOutcome> {
        if help_requested(args) {
            debug!("Help requested for {}", self.program);
            return Ok(ParseOutcome::Help(self.help_message()));
        }

        for argument in self.registry.iter_mut() {
            argument.reset();
        }
        self.match_tokens(args)?;
        self.apply_defaults()?;
        self.check_required()?;
        Ok(ParseOutcome::Parsed)
    }

    // Find the Argument a flag token refers to.
    fn resolve(&mut self, token: &str) -> Result<&mut Argument<'a>> {
        if let Some(flag) = as_flag(token) {
            return self
                .registry
                .find_by_flag_mut(flag)
                .ok_or_else(|| Error::UnknownArgumentTag(token.to_owned()));
        }
        if let Some(name) = token.strip_prefix("--") {
            if name.is_empty() {
                return Err(Error::InvalidName(name.to_owned()));
            }
            return self
                .registry
                .get_mut(name)
                .ok_or_else(|| Error::UnknownArgumentTag(token.to_owned()));
        }
        // We don't support positional arguments, so anything else is an error.
        Err(Error::UnknownArgumentTag(token.to_owned()))
    }

    fn match_tokens<S: AsRef<str>>(&mut self, args: &[S]) -> Result<()> {
        let mut state = State::Scanning;
        for token in args.iter().map(|arg| arg.as_ref()) {
            state = match state {
                State::Scanning => {
                    trace!("Matching flag token '{}'", token);
                    let argument = self.resolve(token)?;
                    if argument.is_boolean() {
                        argument.toggle().map_err(|e| Error::BadValue {
                            token: token.to_owned(),
                            source: e,
                        })?;
                        State::Scanning
                    } else {
                        State::ConsumingValue {
                            token: token,
                            name: argument.name().to_owned(),
                        }
                    }
                }
                State::ConsumingValue { token: flag, name } => {
                    trace!("Consuming value '{}' for '{}'", token, flag);
                    let argument = self.registry.get_mut(&name).ok_or_else(|| {
                        Error::Internal(format!("argument '{}' disappeared mid-parse", name))
                    })?;
                    argument.set_literal(token).map_err(|e| Error::BadValue {
                        token: flag.to_owned(),
                        source: e,
                    })?;
                    State::Scanning
                }
            };
        }

        match state {
            State::Scanning => Ok(()),
            State::ConsumingValue { token, .. } => Err(Error::MissingValue(token.to_owned())),
        }
    }

    /// Write declared defaults through to every destination the command line
    /// didn't touch. Running this again afterwards changes nothing.
    pub(crate) fn apply_defaults(&mut self) -> Result<()> {
        for argument in self.registry.iter_mut() {
            if argument.apply_default()? {
                debug!("Defaulted {} to '{}'", argument.long(), argument.value());
            }
        }
        Ok(())
    }

    fn check_required(&self) -> Result<()> {
        match self
            .registry
            .iter()
            .find(|a| a.is_required() && !a.is_satisfied())
        {
            None => Ok(()),
            Some(argument) => Err(Error::MissingRequiredArgument(argument.name().to_owned())),
        }
    }
}

/// Bind the given record's fields to a new Parser, and then parse the given
/// command-line arguments into it.
pub fn parse_record<R: Record, S: AsRef<str>>(
    program: &str,
    record: &mut R,
    args: &[S],
) -> Result<ParseOutcome> {
    let mut parser = Parser::new(program)?;
    record.bind(&mut parser)?;
    parser.parse(args)
}
