//! Matching of command line tokens against registered parameters.
//!
//! Tokens are first classified on their own (see [`classify`]), then a small
//! state machine dispatches them to parameters and checks that every required
//! parameter was seen.

mod engine;
mod token;

pub use engine::match_tokens;
pub use token::{classify, Token};
