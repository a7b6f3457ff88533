//! Declarative command line argument parsing.
//!
//! Parameters are registered as descriptors bound to caller-owned storage,
//! then each call to [`Parser::parse`] matches a token sequence against them,
//! converts values into that storage and checks that every required
//! parameter was given. The same registry renders usage and option help.

mod converter;
mod error;
mod help;
mod layout;
pub mod matcher;
mod param;
mod parser;
mod registry;

pub use converter::{ChoiceConverter, Convert, FlagConverter, FromStrConverter};
pub use error::{BlockerKind, ConversionFailed, Error, ParseError, RegistrationError, Result};
pub use help::HelpRenderer;
pub use layout::HelpLayout;
pub use param::{Arity, Kind, Param, ParamLabel, Requiredness};
pub use parser::Parser;
pub use registry::{is_valid_short_name, ParamId, Registry};

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::{Error, HelpLayout, Param, ParseError, Parser, RegistrationError, Result};
}
