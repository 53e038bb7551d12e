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

use lazy_static::lazy_static;
use regex::Regex;
use std::convert::TryFrom;
use std::fmt;
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;

/// ValueError describes a string literal which couldn't be turned into a value
/// of the requested Kind. Everything but `InvalidType` is a type mismatch
/// between the literal and the destination.
#[derive(Debug, Error)]
pub enum ValueError {
    /// The literal isn't one of the recognized boolean forms.
    #[error("invalid boolean value \"{0}\"")]
    BadBoolean(String),
    /// The literal isn't a well-formed, representable duration.
    #[error("invalid duration \"{literal}\": {reason}")]
    BadDuration {
        /// The offending literal.
        literal: String,
        /// What was wrong with it.
        reason: String,
    },
    /// The literal isn't a well-formed, in-range floating point number.
    #[error("invalid {kind} value \"{literal}\": {reason}")]
    BadFloat {
        /// The offending literal.
        literal: String,
        /// The floating point Kind requested.
        kind: Kind,
        /// What was wrong with it.
        reason: String,
    },
    /// The literal isn't a well-formed integer, or it doesn't fit in the
    /// requested width.
    #[error("invalid {kind} value \"{literal}\": {source}")]
    BadInteger {
        /// The offending literal.
        literal: String,
        /// The integer Kind requested.
        kind: Kind,
        /// The underlying parse failure.
        #[source]
        source: ParseIntError,
    },
    /// A Value of one Kind was handed to a destination of another.
    #[error("invalid type: expected {expected}, found {found}")]
    InvalidType {
        /// The Kind the destination holds.
        expected: Kind,
        /// The Kind of the Value it was given.
        found: Kind,
    },
}

/// A Result type which uses ValueError.
pub type ValueResult<T> = Result<T, ValueError>;

/// Kind is the closed set of types a flag's destination may have.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// `bool`. Flags of this kind are switches, and take no value token.
    Bool,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// `String`.
    String,
    /// `std::time::Duration`, written like "2h3m4s5ms".
    Duration,
}

/// A Coercer turns a string literal into a Value of one particular Kind.
pub type Coercer = fn(&str) -> ValueResult<Value>;

impl Kind {
    /// Returns the coercion function for this Kind. Arguments look this up once
    /// when they are bound, and keep it for the rest of their life.
    pub fn coercer(self) -> Coercer {
        match self {
            Kind::Bool => coerce_bool,
            Kind::I8 => coerce_i8,
            Kind::I16 => coerce_i16,
            Kind::I32 => coerce_i32,
            Kind::I64 => coerce_i64,
            Kind::U8 => coerce_u8,
            Kind::U16 => coerce_u16,
            Kind::U32 => coerce_u32,
            Kind::U64 => coerce_u64,
            Kind::F32 => coerce_f32,
            Kind::F64 => coerce_f64,
            Kind::String => coerce_string,
            Kind::Duration => coerce_duration,
        }
    }

    /// Boolean flags are the only ones which don't consume a value token.
    pub fn is_boolean(self) -> bool {
        self == Kind::Bool
    }

    /// Returns this Kind's zero value: false, 0, "", or a zero Duration.
    pub fn zero(self) -> Value {
        match self {
            Kind::Bool => Value::Bool(false),
            Kind::I8 => Value::I8(0),
            Kind::I16 => Value::I16(0),
            Kind::I32 => Value::I32(0),
            Kind::I64 => Value::I64(0),
            Kind::U8 => Value::U8(0),
            Kind::U16 => Value::U16(0),
            Kind::U32 => Value::U32(0),
            Kind::U64 => Value::U64(0),
            Kind::F32 => Value::F32(0.0),
            Kind::F64 => Value::F64(0.0),
            Kind::String => Value::String(String::new()),
            Kind::Duration => Value::Duration(Duration::from_secs(0)),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::String => "string",
            Kind::Duration => "duration",
        })
    }
}

/// Coerce the given literal into a Value of the given Kind. Tag default values
/// and command-line value tokens both go through here.
pub fn coerce(literal: &str, kind: Kind) -> ValueResult<Value> {
    (kind.coercer())(literal)
}

fn coerce_bool(literal: &str) -> ValueResult<Value> {
    match literal {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(Value::Bool(true)),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(Value::Bool(false)),
        _ => Err(ValueError::BadBoolean(literal.to_owned())),
    }
}

macro_rules! integer_coercer {
    ($fn_name:ident, $t:ty, $variant:ident) => {
        fn $fn_name(literal: &str) -> ValueResult<Value> {
            literal
                .parse::<$t>()
                .map(Value::$variant)
                .map_err(|e| ValueError::BadInteger {
                    literal: literal.to_owned(),
                    kind: Kind::$variant,
                    source: e,
                })
        }
    };
}

integer_coercer!(coerce_i8, i8, I8);
integer_coercer!(coerce_i16, i16, I16);
integer_coercer!(coerce_i32, i32, I32);
integer_coercer!(coerce_i64, i64, I64);
integer_coercer!(coerce_u8, u8, U8);
integer_coercer!(coerce_u16, u16, U16);
integer_coercer!(coerce_u32, u32, U32);
integer_coercer!(coerce_u64, u64, U64);

/// std happily parses "1e40" as an f32 infinity. We only want an infinite
/// result if the user actually asked for one.
fn is_explicit_infinity(literal: &str) -> bool {
    literal
        .trim_start_matches(|c: char| c == '+' || c == '-')
        .to_ascii_lowercase()
        .starts_with("inf")
}

macro_rules! float_coercer {
    ($fn_name:ident, $t:ty, $variant:ident) => {
        fn $fn_name(literal: &str) -> ValueResult<Value> {
            let v = literal
                .parse::<$t>()
                .map_err(|e| ValueError::BadFloat {
                    literal: literal.to_owned(),
                    kind: Kind::$variant,
                    reason: e.to_string(),
                })?;
            if v.is_infinite() && !is_explicit_infinity(literal) {
                return Err(ValueError::BadFloat {
                    literal: literal.to_owned(),
                    kind: Kind::$variant,
                    reason: "value out of range".to_owned(),
                });
            }
            Ok(Value::$variant(v))
        }
    };
}

float_coercer!(coerce_f32, f32, F32);
float_coercer!(coerce_f64, f64, F64);

fn coerce_string(literal: &str) -> ValueResult<Value> {
    Ok(Value::String(literal.to_owned()))
}

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

// Enough fractional digits for nanosecond precision on the largest unit; the
// rest can't change the result.
const MAX_FRACTION_DIGITS: usize = 18;

fn unit_nanos(unit: &str) -> Option<u128> {
    Some(match unit {
        "ns" => 1,
        "us" | "\u{b5}s" | "\u{3bc}s" => NANOS_PER_MICRO,
        "ms" => NANOS_PER_MILLI,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 60 * 60 * NANOS_PER_SEC,
        _ => return None,
    })
}

fn coerce_duration(literal: &str) -> ValueResult<Value> {
    lazy_static! {
        // One "<number><unit>" component, where the number may be fractional.
        static ref COMPONENT: Regex =
            Regex::new(r"^([0-9]*)(?:\.([0-9]*))?([^0-9.]+)").expect("valid duration regex");
    }

    let bad = |reason: &str| ValueError::BadDuration {
        literal: literal.to_owned(),
        reason: reason.to_owned(),
    };

    let (negative, mut rest) = match literal.chars().next() {
        Some('-') => (true, &literal[1..]),
        Some('+') => (false, &literal[1..]),
        _ => (false, literal),
    };
    if rest == "0" {
        return Ok(Value::Duration(Duration::from_secs(0)));
    }
    if rest.is_empty() {
        return Err(bad("empty duration"));
    }
    if negative {
        return Err(bad("negative durations are not supported"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let captures = COMPONENT
            .captures(rest)
            .ok_or_else(|| bad("expected a sequence of <number><unit>"))?;
        let whole = captures.get(1).map_or("", |m| m.as_str());
        let fraction = captures.get(2).map_or("", |m| m.as_str());
        let unit = captures.get(3).map_or("", |m| m.as_str());
        if whole.is_empty() && fraction.is_empty() {
            return Err(bad(&format!("missing number before unit \"{}\"", unit)));
        }
        let scale =
            unit_nanos(unit).ok_or_else(|| bad(&format!("unknown unit \"{}\"", unit)))?;

        let whole: u128 = match whole {
            "" => 0,
            w => w.parse().map_err(|_| bad("value out of range"))?,
        };
        let mut component = whole
            .checked_mul(scale)
            .ok_or_else(|| bad("value out of range"))?;

        let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
        if !fraction.is_empty() {
            let digits: u128 = fraction.parse().map_err(|_| bad("bad fraction"))?;
            component += digits * scale / 10u128.pow(fraction.len() as u32);
        }

        total = total
            .checked_add(component)
            .ok_or_else(|| bad("value out of range"))?;
        rest = &rest[captures.get(0).map_or(rest.len(), |m| m.end())..];
    }

    let nanos = u64::try_from(total).map_err(|_| bad("value out of range"))?;
    Ok(Value::Duration(Duration::from_nanos(nanos)))
}

fn fixed_point(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }
    let width = scale.to_string().len() - 1;
    let fraction = format!("{:0width$}", fraction, width = width);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

/// Render a Duration in the same notation `coerce` accepts, e.g. "2h3m4.005s"
/// or "200ms". Durations of a second or more always use h/m/s.
pub fn format_duration(d: &Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_owned();
    }
    if nanos < NANOS_PER_SEC {
        let (scale, unit) = if nanos < NANOS_PER_MICRO {
            (1, "ns")
        } else if nanos < NANOS_PER_MILLI {
            (NANOS_PER_MICRO, "\u{b5}s")
        } else {
            (NANOS_PER_MILLI, "ms")
        };
        return format!("{}{}", fixed_point(nanos, scale), unit);
    }

    let seconds = nanos / NANOS_PER_SEC;
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    let remainder = (seconds % 60) * NANOS_PER_SEC + nanos % NANOS_PER_SEC;
    out.push_str(&fixed_point(remainder, NANOS_PER_SEC));
    out.push('s');
    out
}

/// A Value is a typed flag value, of one of the supported Kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A `bool` value.
    Bool(bool),
    /// An `i8` value.
    I8(i8),
    /// An `i16` value.
    I16(i16),
    /// An `i32` value.
    I32(i32),
    /// An `i64` value.
    I64(i64),
    /// A `u8` value.
    U8(u8),
    /// A `u16` value.
    U16(u16),
    /// A `u32` value.
    U32(u32),
    /// A `u64` value.
    U64(u64),
    /// An `f32` value.
    F32(f32),
    /// An `f64` value.
    F64(f64),
    /// A `String` value.
    String(String),
    /// A `Duration` value.
    Duration(Duration),
}

impl Value {
    /// Returns the Kind of this Value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::String(_) => Kind::String,
            Value::Duration(_) => Kind::Duration,
        }
    }
}

/// Values display as literals which coerce back into an equal Value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::String(v) => f.write_str(v),
            Value::Duration(v) => f.write_str(&format_duration(v)),
        }
    }
}

/// FlagValue is implemented by every Rust type a flag can be bound to. It
/// connects the concrete type to its Kind, and converts to and from Value.
pub trait FlagValue: Sized {
    /// The Kind of Value this type holds.
    const KIND: Kind;

    /// Unwrap a Value of this type's Kind.
    fn from_value(value: Value) -> ValueResult<Self>;

    /// Wrap a copy of this value up as a Value.
    fn to_value(&self) -> Value;

    /// Whether this is the type's zero value (false, 0, "", and so on).
    fn is_zero(&self) -> bool;
}

macro_rules! impl_flag_value {
    ($t:ty, $variant:ident) => {
        impl FlagValue for $t {
            const KIND: Kind = Kind::$variant;

            fn from_value(value: Value) -> ValueResult<Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(ValueError::InvalidType {
                        expected: Kind::$variant,
                        found: other.kind(),
                    }),
                }
            }

            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }

            fn is_zero(&self) -> bool {
                *self == <$t>::default()
            }
        }
    };
}

impl_flag_value!(bool, Bool);
impl_flag_value!(i8, I8);
impl_flag_value!(i16, I16);
impl_flag_value!(i32, I32);
impl_flag_value!(i64, I64);
impl_flag_value!(u8, U8);
impl_flag_value!(u16, U16);
impl_flag_value!(u32, U32);
impl_flag_value!(u64, U64);
impl_flag_value!(f32, F32);
impl_flag_value!(f64, F64);
impl_flag_value!(String, String);
impl_flag_value!(Duration, Duration);
