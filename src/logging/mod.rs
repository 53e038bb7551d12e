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

use crate::error::*;
use log::{self, LevelFilter, Log, Metadata, Record};
use regex::Regex;
use std::io::Write;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

const RUST_LOG_ENV_VAR: &str = "RUST_LOG";

/// Command-line programs shouldn't be chatty unless asked to be, so without any
/// filters only warnings and errors are shown.
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Parse a log::LevelFilter from a string, ignoring case and surrounding
/// whitespace.
pub fn parse_log_level_filter(s: &str) -> Result<LevelFilter> {
    let normalized = s.trim();
    [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ]
    .iter()
    .find(|f| f.to_string().eq_ignore_ascii_case(normalized))
    .copied()
    .ok_or_else(|| Error::InvalidArgument(format!("invalid LevelFilter '{}'", s)))
}

/// A LogFilter sets the maximum level for the modules matching a regex (or for
/// all modules, if there is no regex).
#[derive(Debug)]
pub struct LogFilter {
    /// Modules this filter applies to, anchored at the start of the module
    /// path. None means every module.
    pub module: Option<Regex>,
    /// The maximum level enabled for matching modules.
    pub level: LevelFilter,
}

impl LogFilter {
    /// The LevelFilter this LogFilter applies to the given module, or None if
    /// it doesn't apply.
    pub fn max_level_for(&self, module_path: &str) -> Option<LevelFilter> {
        match self.module {
            None => Some(self.level),
            Some(ref module) => match module.is_match(module_path) {
                false => None,
                true => Some(self.level),
            },
        }
    }
}

impl FromStr for LogFilter {
    type Err = Error;

    /// Either "level", or "module_regex=level".
    fn from_str(s: &str) -> Result<LogFilter> {
        match s.rfind('=') {
            None => Ok(LogFilter {
                module: None,
                level: parse_log_level_filter(s)?,
            }),
            Some(eq_pos) => Ok(LogFilter {
                module: Some(Regex::new(&format!("^{}", &s[..eq_pos]))?),
                level: parse_log_level_filter(&s[eq_pos + 1..])?,
            }),
        }
    }
}

/// LogFilters is a set of LogFilter, written as "filter;filter;...".
#[derive(Debug)]
pub struct LogFilters(pub Vec<LogFilter>);

impl LogFilters {
    /// The most restrictive level any filter applies to the given module, or
    /// Trace if none of them apply.
    pub fn max_level_for(&self, module_path: &str) -> LevelFilter {
        self.0
            .iter()
            .filter_map(|f| f.max_level_for(module_path))
            .min()
            .unwrap_or(LevelFilter::Trace)
    }

    /// The highest level enabled by any filter. This is what gets handed to
    /// `log::set_max_level`.
    pub fn max_level(&self) -> LevelFilter {
        self.0
            .iter()
            .map(|f| f.level)
            .max()
            .unwrap_or(LevelFilter::Trace)
    }
}

impl FromStr for LogFilters {
    type Err = Error;

    fn from_str(s: &str) -> Result<LogFilters> {
        let filters: Result<Vec<LogFilter>> = s
            .split(';')
            .filter(|f| !f.trim().is_empty())
            .map(|f| f.parse())
            .collect();
        Ok(LogFilters(filters?))
    }
}

/// Where log output goes. Shared so tests (or callers) can keep a handle to it.
pub type LogOutput = Arc<Mutex<dyn Write + Send>>;

/// Options controls the behavior of a Logger.
pub struct Options {
    /// Filters controlling which log statements are enabled.
    pub filters: LogFilters,
    /// Where to write log output to.
    pub output: LogOutput,
    /// If true, flush the output after every log statement.
    pub always_flush: bool,
}

/// OptionsBuilder constructs Options, filling in defaults for anything not set
/// explicitly.
#[derive(Default)]
pub struct OptionsBuilder {
    filters: Option<LogFilters>,
    output: Option<LogOutput>,
    always_flush: bool,
}

impl OptionsBuilder {
    /// Constructs a new builder, with everything defaulted.
    pub fn new() -> Self {
        OptionsBuilder::default()
    }

    /// Use the given filters.
    pub fn set_filters(mut self, filters: LogFilters) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Use the filters in the RUST_LOG environment variable, if it is set.
    pub fn set_filters_from_env(mut self) -> Result<Self> {
        match ::std::env::var(RUST_LOG_ENV_VAR) {
            Ok(filters) => self.filters = Some(filters.parse()?),
            Err(::std::env::VarError::NotPresent) => {}
            Err(::std::env::VarError::NotUnicode(_)) => {
                return Err(Error::InvalidArgument(format!(
                    "environment variable '{}' not valid unicode",
                    RUST_LOG_ENV_VAR
                )));
            }
        }
        Ok(self)
    }

    /// Write log output to the given shared writer, instead of stderr.
    pub fn set_output(mut self, output: LogOutput) -> Self {
        self.output = Some(output);
        self
    }

    /// Flush after every statement (slow, but nothing gets lost).
    pub fn set_always_flush(mut self, always_flush: bool) -> Self {
        self.always_flush = always_flush;
        self
    }

    /// Build the final Options.
    pub fn build(self) -> Options {
        let output: LogOutput = match self.output {
            Some(output) => output,
            None => Arc::new(Mutex::new(::std::io::stderr())),
        };
        Options {
            filters: self.filters.unwrap_or_else(|| {
                LogFilters(vec![LogFilter {
                    module: None,
                    level: DEFAULT_LEVEL,
                }])
            }),
            output: output,
            always_flush: self.always_flush,
        }
    }
}

/// Format a log record as a single line (without the trailing newline).
pub fn format_log_record(record: &Record) -> String {
    format!(
        "[{} {}:{}] {} - {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        record.file().unwrap_or("UNKNOWN_FILE"),
        record
            .line()
            .map_or("UNKNOWN_LINE".to_owned(), |l| l.to_string()),
        record.level(),
        record.args()
    )
}

/// Logger is a `log::Log` implementation which writes timestamped lines to
/// some output, subject to a set of LogFilters.
pub struct Logger {
    options: Options,
}

impl Logger {
    /// Constructs a new Logger with the given Options.
    pub fn new(options: Options) -> Self {
        Logger { options: options }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.options.filters.max_level()
    }

    fn log(&self, record: &Record) {
        if record.level()
            > self
                .options
                .filters
                .max_level_for(record.module_path().unwrap_or(""))
        {
            return;
        }

        // Logging must never take the program down; a poisoned or broken
        // output just loses the line.
        if let Ok(mut output) = self.options.output.lock() {
            let _ = writeln!(output, "{}", format_log_record(record));
            if self.options.always_flush {
                let _ = output.flush();
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut output) = self.options.output.lock() {
            let _ = output.flush();
        }
    }
}

/// Install a Logger with the given Options as the global logger.
pub fn try_init(options: Options) -> Result<()> {
    let logger = Logger::new(options);
    log::set_max_level(logger.options.filters.max_level());
    log::set_boxed_logger(Box::new(logger))?;
    Ok(())
}
