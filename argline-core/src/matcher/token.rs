//! Classification of a single command line token.
//!
//! Accepted forms:
//! - `--name value`, `--name=value`, `--name` (flags)
//! - `-s value`, `-s` (flags)
//! - anything else not starting with `-` is positional, as is a lone `-`

/// Shape of one raw token, independent of any registered parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'t> {
    /// `-s`
    Short(char),
    /// `--name`
    Long(&'t str),
    /// `--name=value`, split at the first `=`
    LongWithValue { name: &'t str, value: &'t str },
    /// A single dash followed by more than one character, like `-abc`
    Malformed(&'t str),
    /// A positional token
    Bare(&'t str),
}

/// Classify a token.
///
/// Only called for tokens that are not being consumed as an option value,
/// so values such as `-30` never reach this function.
pub fn classify(token: &str) -> Token<'_> {
    if let Some(rest) = token.strip_prefix("--") {
        if !rest.is_empty() {
            return match rest.split_once('=') {
                Some((name, value)) => Token::LongWithValue { name, value },
                None => Token::Long(rest),
            };
        }
    }

    // Lengths are in bytes: registered short names are ASCII, so `-é` can
    // never name one and is malformed rather than unknown.
    if let Some(rest) = token.strip_prefix('-') {
        return match rest.len() {
            0 => Token::Bare(token),
            1 => Token::Short(char::from(rest.as_bytes()[0])),
            _ => Token::Malformed(token),
        };
    }

    Token::Bare(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("-s", Token::Short('s'))]
    #[case("-3", Token::Short('3'))]
    #[case("--", Token::Short('-'))]
    #[case("--name", Token::Long("name"))]
    #[case("--n", Token::Long("n"))]
    #[case("--name=value", Token::LongWithValue { name: "name", value: "value" })]
    #[case("--name=a=b", Token::LongWithValue { name: "name", value: "a=b" })]
    #[case("--name=", Token::LongWithValue { name: "name", value: "" })]
    #[case("--=x", Token::LongWithValue { name: "", value: "x" })]
    #[case("---name", Token::Long("-name"))]
    #[case("-string", Token::Malformed("-string"))]
    #[case("-30", Token::Malformed("-30"))]
    #[case("-", Token::Bare("-"))]
    #[case("", Token::Bare(""))]
    #[case("report.txt", Token::Bare("report.txt"))]
    #[case("a b c", Token::Bare("a b c"))]
    fn classifies(#[case] raw: &str, #[case] expected: Token<'static>) {
        assert_eq!(classify(raw), expected);
    }

    #[rstest]
    #[case("-é")]
    #[case("-ab")]
    fn multibyte_single_dash_is_malformed(#[case] raw: &str) {
        assert_eq!(classify(raw), Token::Malformed(raw));
    }
}
