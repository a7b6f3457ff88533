//! Conversion of single command line tokens into typed values.
//!
//! A [`Convert`] turns one token into one value. Bindings sit on top of a
//! converter and write into caller-owned storage, either replacing a scalar
//! or appending to a list.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::ConversionFailed;

/// Converts one token into a value of type `T`.
pub trait Convert<T> {
    fn convert(&self, token: &str) -> Result<T, ConversionFailed>;

    /// Literal tokens accepted by this converter, sorted, when the set is closed.
    fn valid_values(&self) -> Option<Vec<String>> {
        None
    }
}

/// Converts through [`FromStr`], which consumes the whole token.
///
/// Numbers reject trailing characters (`"10x"` fails), `String` and
/// `PathBuf` take the token verbatim including embedded whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct FromStrConverter;

impl<T: FromStr> Convert<T> for FromStrConverter {
    fn convert(&self, token: &str) -> Result<T, ConversionFailed> {
        token.parse().map_err(|_| ConversionFailed::new(token))
    }
}

/// Converts flag tokens: `true`/`1` and `false`/`0`, nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagConverter;

impl Convert<bool> for FlagConverter {
    fn convert(&self, token: &str) -> Result<bool, ConversionFailed> {
        match token {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ConversionFailed::new(token)),
        }
    }
}

/// Converts by exact lookup in a table of literal tokens.
#[derive(Debug, Clone)]
pub struct ChoiceConverter<T> {
    values: BTreeMap<String, T>,
}

impl<T> ChoiceConverter<T> {
    pub fn new<K, I>(values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, T)>,
    {
        Self {
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    fn literals(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

impl<T: Clone> Convert<T> for ChoiceConverter<T> {
    fn convert(&self, token: &str) -> Result<T, ConversionFailed> {
        self.values
            .get(token)
            .cloned()
            .ok_or_else(|| ConversionFailed::new(token).with_valid_values(self.literals()))
    }

    fn valid_values(&self) -> Option<Vec<String>> {
        Some(self.literals())
    }
}

/// Type-erased sink a descriptor feeds tokens into.
///
/// `first_touch` is true for the first value a descriptor receives in the
/// current matching invocation.
pub(crate) trait Binding {
    fn bind(&mut self, token: &str, first_touch: bool) -> Result<(), ConversionFailed>;
    fn valid_values(&self) -> Option<Vec<String>>;
}

/// Overwrites the target on every occurrence.
pub(crate) struct ScalarBinding<'a, T, C> {
    target: &'a RefCell<T>,
    converter: C,
}

impl<'a, T, C> ScalarBinding<'a, T, C> {
    pub(crate) fn new(target: &'a RefCell<T>, converter: C) -> Self {
        Self { target, converter }
    }
}

impl<'a, T, C: Convert<T>> Binding for ScalarBinding<'a, T, C> {
    fn bind(&mut self, token: &str, _first_touch: bool) -> Result<(), ConversionFailed> {
        let value = self.converter.convert(token)?;
        *self.target.borrow_mut() = value;
        Ok(())
    }

    fn valid_values(&self) -> Option<Vec<String>> {
        self.converter.valid_values()
    }
}

/// Appends every occurrence. The first successful conversion of an
/// invocation clears whatever an earlier invocation left behind.
pub(crate) struct ListBinding<'a, T, C> {
    target: &'a RefCell<Vec<T>>,
    converter: C,
}

impl<'a, T, C> ListBinding<'a, T, C> {
    pub(crate) fn new(target: &'a RefCell<Vec<T>>, converter: C) -> Self {
        Self { target, converter }
    }
}

impl<'a, T, C: Convert<T>> Binding for ListBinding<'a, T, C> {
    fn bind(&mut self, token: &str, first_touch: bool) -> Result<(), ConversionFailed> {
        let value = self.converter.convert(token)?;
        let mut target = self.target.borrow_mut();
        if first_touch {
            target.clear();
        }
        target.push(value);
        Ok(())
    }

    fn valid_values(&self) -> Option<Vec<String>> {
        self.converter.valid_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    #[rstest]
    #[case("10", Some(10))]
    #[case("-30", Some(-30))]
    #[case("+7", Some(7))]
    #[case("10x", None)]
    #[case(" 10", None)]
    #[case("", None)]
    fn integers_must_consume_the_whole_token(#[case] token: &str, #[case] expected: Option<i32>) {
        let result = Convert::<i32>::convert(&FromStrConverter, token);
        assert_eq!(result.ok(), expected);
    }

    #[test]
    fn text_is_taken_verbatim() {
        let value = Convert::<String>::convert(&FromStrConverter, "a b  c ").unwrap();
        assert_eq!(value, "a b  c ");

        let path = Convert::<PathBuf>::convert(&FromStrConverter, "dir/with space.txt").unwrap();
        assert_eq!(path, PathBuf::from("dir/with space.txt"));
    }

    #[test]
    fn failure_carries_the_raw_token() {
        let err = Convert::<f64>::convert(&FromStrConverter, "1.5.2").unwrap_err();
        assert_eq!(err, ConversionFailed::new("1.5.2"));
    }

    #[rstest]
    #[case("true", Some(true))]
    #[case("1", Some(true))]
    #[case("false", Some(false))]
    #[case("0", Some(false))]
    #[case("yes", None)]
    #[case("01", None)]
    #[case("", None)]
    fn flag_tokens(#[case] token: &str, #[case] expected: Option<bool>) {
        assert_eq!(FlagConverter.convert(token).ok(), expected);
    }

    #[test]
    fn choices_report_sorted_literals() {
        let converter = ChoiceConverter::new([("low", 0), ("high", 1)]);
        assert_eq!(converter.convert("high").unwrap(), 1);

        let err = converter.convert("mid").unwrap_err();
        assert_eq!(err.raw_token, "mid");
        assert_eq!(
            err.valid_values,
            Some(vec!["high".to_string(), "low".to_string()])
        );
        assert_eq!(err.to_string(), "Cannot convert \"mid\". Valid values: high, low");
    }

    #[test]
    fn scalar_binding_overwrites() {
        let target = RefCell::new(0u8);
        let mut binding = ScalarBinding::new(&target, FromStrConverter);
        binding.bind("1", true).unwrap();
        binding.bind("2", false).unwrap();
        assert_eq!(*target.borrow(), 2);
    }

    #[test]
    fn list_binding_clears_on_first_touch_only() {
        let target = RefCell::new(vec![9, 9]);
        let mut binding = ListBinding::new(&target, FromStrConverter);
        binding.bind("1", true).unwrap();
        binding.bind("2", false).unwrap();
        assert_eq!(*target.borrow(), vec![1, 2]);
    }

    #[test]
    fn failed_first_conversion_keeps_old_list() {
        let target = RefCell::new(vec![9]);
        let mut binding = ListBinding::new(&target, FromStrConverter);
        assert!(binding.bind("nine", true).is_err());
        assert_eq!(*target.borrow(), vec![9]);
    }
}
