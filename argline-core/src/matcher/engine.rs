//! The matching state machine.
//!
//! One pass over the tokens per invocation. Every parameter's match state is
//! reset first, so invocations on the same registry are independent apart
//! from storage they leave untouched: scalars keep their last value and lists
//! are only cleared when they receive their first value of the new
//! invocation.

use tracing::{debug, trace};

use super::token::{classify, Token};
use crate::error::ParseError;
use crate::param::FLAG_VALUE;
use crate::registry::{ParamId, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    AwaitingValueFor(ParamId),
}

/// Match `tokens` (program name excluded) against `registry`, writing
/// converted values into the bound storage.
///
/// On error, values bound before the failing token stay bound.
pub fn match_tokens<I, S>(registry: &mut Registry<'_>, tokens: I) -> Result<(), ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    registry.reset_matches();

    let result = scan(registry, tokens);
    if let Err(err) = &result {
        debug!("Matching failed: {}", err);
    }
    result
}

fn scan<I, S>(registry: &mut Registry<'_>, tokens: I) -> Result<(), ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = State::Scanning;
    let mut positional_cursor = 0;
    let mut count = 0usize;

    for token in tokens {
        let token = token.as_ref();
        count += 1;

        if let State::AwaitingValueFor(id) = state {
            trace!("Value {:?} for {}", token, registry.get(id).label());
            feed(registry, id, token)?;
            state = State::Scanning;
            continue;
        }

        let classified = classify(token);
        trace!("Token {:?} classified as {:?}", token, classified);

        state = match classified {
            Token::Short(short_name) => {
                let id = registry
                    .lookup_short(short_name)
                    .ok_or_else(|| ParseError::UnknownArgument(token.to_string()))?;
                select(registry, id)?
            }
            Token::Long(name) => {
                let id = registry
                    .lookup_long(name)
                    .ok_or_else(|| ParseError::UnknownArgument(token.to_string()))?;
                select(registry, id)?
            }
            Token::LongWithValue { name, value } => {
                let id = registry
                    .lookup_long(name)
                    .ok_or_else(|| ParseError::UnknownArgument(format!("--{}", name)))?;
                feed(registry, id, value)?;
                State::Scanning
            }
            Token::Malformed(raw) => {
                return Err(ParseError::BadArgument(raw.to_string()));
            }
            Token::Bare(raw) => {
                let id = *registry
                    .positional()
                    .get(positional_cursor)
                    .ok_or_else(|| ParseError::UnexpectedPositionalArgument(raw.to_string()))?;
                feed(registry, id, raw)?;
                if !registry.get(id).is_list() {
                    positional_cursor += 1;
                }
                State::Scanning
            }
        };
    }

    if let State::AwaitingValueFor(id) = state {
        return Err(ParseError::DanglingOption(registry.get(id).label()));
    }

    let unmatched = registry
        .named_params()
        .chain(registry.positional_params())
        .find(|param| !param.is_optional() && !param.was_matched());
    if let Some(param) = unmatched {
        return Err(ParseError::MissingArgument(param.label()));
    }

    debug!("Matched {} tokens against {} parameters", count, registry.len());
    Ok(())
}

/// Flags bind immediately, everything else waits for the next token.
fn select(registry: &mut Registry<'_>, id: ParamId) -> Result<State, ParseError> {
    if registry.get(id).is_flag() {
        feed(registry, id, FLAG_VALUE)?;
        Ok(State::Scanning)
    } else {
        Ok(State::AwaitingValueFor(id))
    }
}

fn feed(registry: &mut Registry<'_>, id: ParamId, token: &str) -> Result<(), ParseError> {
    let param = registry.get_mut(id);
    param.feed(token).map_err(|failed| ParseError::BadValue {
        param: param.label(),
        token: failed.raw_token,
        valid_values: failed.valid_values,
    })
}
