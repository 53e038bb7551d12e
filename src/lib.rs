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

#![deny(
    anonymous_parameters,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![warn(bare_trait_objects, unreachable_pub, unused_qualifications)]

//! tagflags binds command-line flags directly into the fields of a caller's
//! struct. Each field is described once by a compact tag string, e.g.
//! `"-n;--name;required;help=who to greet"`, and bound imperatively through a
//! `&mut` reference; parsing then writes typed values straight through.

/// argument defines the descriptor for a single bound flag, and the parser for
/// the tag strings which describe one.
pub mod argument;
/// destination defines the write capability an Argument holds into a field of
/// the caller's record.
pub mod destination;
/// error defines the error types this crate produces.
pub mod error;
/// help renders usage messages.
pub mod help;
/// logging provides a Logger implementation suitable for command-line
/// applications.
#[cfg(feature = "logging")]
pub mod logging;
/// main_impl provides the process-level wrapper: reading the program's real
/// arguments, printing help or errors, and exiting.
pub mod main_impl;
/// parser contains the token matcher, and the validation / defaulting pass
/// which runs after it.
pub mod parser;
/// registry holds the set of Arguments bound for one record.
pub mod registry;
/// testing provides utilities which are useful for unit testing code which
/// uses this crate.
pub mod testing;
/// value defines the closed set of supported value types, and the single
/// coercion path from string literals into them.
pub mod value;

// Re-export most commonly used symbols, to allow using this library with just
// one "use".

pub use self::error::{Error, Result};
pub use self::main_impl::main_impl;
pub use self::parser::{parse_record, ParseOutcome, Parser, Record};

// Tests have significantly more dependencies than the code being tested. Don't
// bother running tests unless all features are enabled.
#[cfg(feature = "logging")]
#[cfg(test)]
mod tests;

use lazy_static::lazy_static;

lazy_static! {
    static ref INIT_STATUS: ::std::sync::Mutex<bool> = ::std::sync::Mutex::new(false);
}

#[cfg(feature = "logging")]
fn init_logging() -> Result<()> {
    let options = logging::OptionsBuilder::new()
        .set_filters_from_env()?
        .build();
    match logging::try_init(options) {
        Ok(()) => Ok(()),
        // Some other logger is already installed; leave it alone.
        Err(Error::SetLogger(_)) => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(not(feature = "logging"))]
fn init_logging() -> Result<()> {
    Ok(())
}

/// Initialize the library. Currently this installs this crate's Logger (see
/// the `logging` module), configured from the `RUST_LOG` environment variable,
/// unless some other logger has already been installed. Calling this more than
/// once is harmless.
pub fn init() -> Result<()> {
    let mut lock = INIT_STATUS
        .lock()
        .map_err(|_| Error::Internal("library initialization lock poisoned".to_owned()))?;
    if *lock {
        return Ok(());
    }

    init_logging()?;

    *lock = true;
    Ok(())
}
