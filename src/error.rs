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

use crate::value::ValueError;
use thiserror::Error;

/// Error represents the various errors which can come up while binding or
/// parsing command-line flags.
///
/// Errors returned while binding (`Parser::bind` and friends) mean the
/// record's own flag declarations are wrong, which is a bug in the program.
/// Errors returned from `Parser::parse` are the user's fault, and are suitable
/// for reporting back to them.
#[derive(Debug, Error)]
pub enum Error {
    /// Two Arguments were bound with the same long name.
    #[error("duplicate argument name \"{0}\"")]
    DuplicateName(String),
    /// An internal unrecoverable error.
    #[error("internal error: {0}")]
    Internal(String),
    /// Errors akin to EINVAL - essentially, an argument passed into a function
    /// was invalid in some way.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A malformed short flag, either in a tag or bound more than once.
    #[error("bad flag \"{0}\": must be of the form \"-?\" where \"?\" is an unused letter")]
    InvalidFlag(String),
    /// An empty or malformed long name, in a tag or in a command-line token.
    #[error("invalid name \"{0}\"")]
    InvalidName(String),
    /// A value supplied on the command line couldn't be parsed as the type of
    /// the flag it was given for.
    #[error("invalid value for \"{token}\": {source}")]
    BadValue {
        /// The flag token the value was supplied for, e.g. `--max-age`.
        token: String,
        /// The underlying coercion failure.
        #[source]
        source: ValueError,
    },
    /// A required argument never received a value, and has no default.
    #[error("missing required argument \"{0}\"")]
    MissingRequiredArgument(String),
    /// A non-boolean flag was the last token, with nothing after it.
    #[error("missing value for \"{0}\"")]
    MissingValue(String),
    /// An error encountered in either parsing or applying a regular expression.
    #[error("{0}")]
    Regex(#[from] regex::Error),
    /// An error encountered when attempting to set the global Logger
    /// implementation.
    #[error("{0}")]
    SetLogger(#[from] log::SetLoggerError),
    /// An unrecognized tag fragment, or a command-line token which doesn't
    /// match any bound Argument.
    #[error("unknown argument tag \"{0}\"")]
    UnknownArgumentTag(String),
    /// A literal (e.g. a tag's default value) couldn't be coerced.
    #[error("{0}")]
    Value(#[from] ValueError),
}

/// A Result type which uses this crate's internal Error type.
pub type Result<T> = std::result::Result<T, Error>;
