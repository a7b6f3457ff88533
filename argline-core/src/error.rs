//! Error types for argline.
//!
//! Registration errors and parse errors are kept apart: the former are
//! mistakes in the program that declares its parameters, the latter are
//! mistakes in the command line a user typed.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::param::ParamLabel;

/// A parameter descriptor was rejected by the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RegistrationError {
    /// Another descriptor already uses this long name
    #[error("Repeated parameter long name: {0}")]
    DuplicateLongName(ParamLabel),

    /// Another descriptor already uses this short name
    #[error("Repeated parameter short name: {0}")]
    DuplicateShortName(ParamLabel),

    /// Long names need at least two characters
    #[error("Too short long name parameter: {0}")]
    LongNameTooShort(ParamLabel),

    /// Short names must be printable ASCII other than space
    #[error("Bad short name {short_name:?} for parameter: --{long_name}")]
    InvalidShortName { long_name: String, short_name: char },

    /// An optional or list positional must be the last positional
    #[error("{blocker_kind} {blocker} followed by another positional parameter {rejected}")]
    PositionalOrderViolation {
        blocker: ParamLabel,
        blocker_kind: BlockerKind,
        rejected: ParamLabel,
    },

    /// Flags never consume a token, so they cannot take a position
    #[error("Flag cannot be positional: {0}")]
    FlagPositional(ParamLabel),
}

/// Why a positional descriptor blocks any further positional registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockerKind {
    Optional,
    List,
}

impl fmt::Display for BlockerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockerKind::Optional => f.write_str("Optional positional parameter"),
            BlockerKind::List => f.write_str("Positional list parameter"),
        }
    }
}

/// The command line did not match the registered parameters.
///
/// Values bound before the failing token stay bound; a failed invocation
/// does not roll anything back.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseError {
    /// An option token names no registered parameter
    #[error("Unexpected argument: {0}")]
    UnknownArgument(String),

    /// A single dash followed by more than one character
    #[error("Bad argument: {0}")]
    BadArgument(String),

    /// A bare token arrived after every positional slot was filled
    #[error("Unexpected positional argument: {0}")]
    UnexpectedPositionalArgument(String),

    /// The command line ended while an option was still waiting for its value
    #[error("Missing value for argument: {0}")]
    DanglingOption(ParamLabel),

    /// The token could not be converted to the parameter's value type
    #[error("Bad argument {param}: {token}{}", valid_values_suffix(.valid_values))]
    BadValue {
        param: ParamLabel,
        token: String,
        valid_values: Option<Vec<String>>,
    },

    /// A required parameter was never matched
    #[error("Missing argument: {0}")]
    MissingArgument(ParamLabel),

    /// A process argument is not valid UTF-8, shown with replacement characters
    #[error("Invalid argument encoding: {0}")]
    InvalidEncoding(String),
}

fn valid_values_suffix(valid_values: &Option<Vec<String>>) -> String {
    match valid_values {
        Some(values) => format!(". Valid values: {}", values.join(", ")),
        None => String::new(),
    }
}

/// A converter rejected a token.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Cannot convert {raw_token:?}{}", valid_values_suffix(.valid_values))]
pub struct ConversionFailed {
    pub raw_token: String,
    pub valid_values: Option<Vec<String>>,
}

impl ConversionFailed {
    pub fn new(raw_token: &str) -> Self {
        Self {
            raw_token: raw_token.to_string(),
            valid_values: None,
        }
    }

    pub fn with_valid_values(mut self, values: Vec<String>) -> Self {
        self.valid_values = Some(values);
        self
    }
}

/// Top-level error for callers that drive registration, parsing and help
/// output through one `?` chain.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for argline operations
pub type Result<T> = std::result::Result<T, Error>;
