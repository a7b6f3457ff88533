//! Parameter descriptors.
//!
//! A [`Param`] is the unit of registration: its identity, its constraints and
//! a binding that converts tokens into caller-owned storage. Storage is
//! borrowed for `'a`, so a descriptor (and the parser owning it) can never
//! outlive the values it writes to.

use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

use crate::converter::{
    Binding, ChoiceConverter, Convert, FlagConverter, FromStrConverter, ListBinding,
    ScalarBinding,
};
use crate::error::ConversionFailed;

/// Token fed to a flag when it is matched.
pub(crate) const FLAG_VALUE: &str = "true";

/// How many values a parameter binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Arity {
    /// One value, the last occurrence wins
    Scalar,
    /// Every occurrence, in encounter order
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Requiredness {
    Required,
    Optional,
}

/// Whether a parameter is matched by name or by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Kind {
    Named,
    /// 1-based position among positional parameters
    Positional(usize),
}

/// Identity of a parameter as shown in diagnostics: `-s/--name`, `--name`
/// or `#1 --name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamLabel {
    pub long_name: String,
    pub short_name: Option<char>,
    pub position: Option<usize>,
}

impl fmt::Display for ParamLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(position) = self.position {
            write!(f, "#{} ", position)?;
        } else if let Some(short_name) = self.short_name {
            write!(f, "-{}/", short_name)?;
        }
        write!(f, "--{}", self.long_name)
    }
}

/// A registered (or about to be registered) parameter.
pub struct Param<'a> {
    long_name: String,
    short_name: Option<char>,
    help: String,
    requiredness: Requiredness,
    flag: bool,
    arity: Arity,
    kind: Kind,
    binding: Box<dyn Binding + 'a>,
    matched: bool,
}

impl<'a> Param<'a> {
    fn with_binding(
        long_name: impl Into<String>,
        arity: Arity,
        binding: Box<dyn Binding + 'a>,
    ) -> Self {
        Self {
            long_name: long_name.into(),
            short_name: None,
            help: String::new(),
            requiredness: Requiredness::Required,
            flag: false,
            arity,
            kind: Kind::Named,
            binding,
            matched: false,
        }
    }

    /// A scalar parameter converted with [`FromStr`].
    pub fn value<T: FromStr + 'a>(long_name: impl Into<String>, target: &'a RefCell<T>) -> Self {
        Self::value_with(long_name, target, FromStrConverter)
    }

    /// A list parameter, each element converted with [`FromStr`].
    pub fn list<T: FromStr + 'a>(
        long_name: impl Into<String>,
        target: &'a RefCell<Vec<T>>,
    ) -> Self {
        Self::list_with(long_name, target, FromStrConverter)
    }

    /// A scalar parameter restricted to the literal tokens of `values`.
    pub fn choice<T, K, I>(long_name: impl Into<String>, target: &'a RefCell<T>, values: I) -> Self
    where
        T: Clone + 'a,
        K: Into<String>,
        I: IntoIterator<Item = (K, T)>,
    {
        Self::value_with(long_name, target, ChoiceConverter::new(values))
    }

    /// A list parameter whose elements are restricted to the literal tokens of `values`.
    pub fn choice_list<T, K, I>(
        long_name: impl Into<String>,
        target: &'a RefCell<Vec<T>>,
        values: I,
    ) -> Self
    where
        T: Clone + 'a,
        K: Into<String>,
        I: IntoIterator<Item = (K, T)>,
    {
        Self::list_with(long_name, target, ChoiceConverter::new(values))
    }

    /// A scalar parameter with a custom converter.
    pub fn value_with<T, C>(
        long_name: impl Into<String>,
        target: &'a RefCell<T>,
        converter: C,
    ) -> Self
    where
        T: 'a,
        C: Convert<T> + 'a,
    {
        Self::with_binding(
            long_name,
            Arity::Scalar,
            Box::new(ScalarBinding::new(target, converter)),
        )
    }

    /// A list parameter with a custom converter.
    pub fn list_with<T, C>(
        long_name: impl Into<String>,
        target: &'a RefCell<Vec<T>>,
        converter: C,
    ) -> Self
    where
        T: 'a,
        C: Convert<T> + 'a,
    {
        Self::with_binding(
            long_name,
            Arity::List,
            Box::new(ListBinding::new(target, converter)),
        )
    }

    /// A flag: consumes no following token, binds `true` when present and is
    /// always optional. The `--name=value` form accepts `true`, `false`, `1`
    /// and `0`.
    pub fn flag(long_name: impl Into<String>, target: &'a RefCell<bool>) -> Self {
        let mut param = Self::value_with(long_name, target, FlagConverter);
        param.flag = true;
        param.requiredness = Requiredness::Optional;
        param
    }

    pub fn short(mut self, short_name: char) -> Self {
        self.short_name = Some(short_name);
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn optional(mut self) -> Self {
        self.requiredness = Requiredness::Optional;
        self
    }

    /// Makes the parameter required. Has no effect on flags.
    pub fn required(mut self) -> Self {
        if !self.flag {
            self.requiredness = Requiredness::Required;
        }
        self
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn requiredness(&self) -> Requiredness {
        self.requiredness
    }

    pub fn is_optional(&self) -> bool {
        self.requiredness == Requiredness::Optional
    }

    pub fn is_flag(&self) -> bool {
        self.flag
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn is_list(&self) -> bool {
        self.arity == Arity::List
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn position(&self) -> Option<usize> {
        match self.kind {
            Kind::Named => None,
            Kind::Positional(position) => Some(position),
        }
    }

    /// Whether the parameter received a value in the latest matching invocation.
    pub fn was_matched(&self) -> bool {
        self.matched
    }

    /// Accepted literal tokens, sorted, for choice parameters.
    pub fn valid_values(&self) -> Option<Vec<String>> {
        self.binding.valid_values()
    }

    pub fn label(&self) -> ParamLabel {
        ParamLabel {
            long_name: self.long_name.clone(),
            short_name: self.short_name,
            position: self.position(),
        }
    }

    pub(crate) fn set_kind(&mut self, kind: Kind) {
        self.kind = kind;
    }

    pub(crate) fn reset(&mut self) {
        self.matched = false;
    }

    /// Converts `token` into the bound storage.
    ///
    /// # Panics
    ///
    /// Panics if the caller holds a borrow of the bound `RefCell` while
    /// parsing.
    pub(crate) fn feed(&mut self, token: &str) -> Result<(), ConversionFailed> {
        self.binding.bind(token, !self.matched)?;
        self.matched = true;
        Ok(())
    }
}

impl fmt::Debug for Param<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
            .field("long_name", &self.long_name)
            .field("short_name", &self.short_name)
            .field("requiredness", &self.requiredness)
            .field("flag", &self.flag)
            .field("arity", &self.arity)
            .field("kind", &self.kind)
            .field("matched", &self.matched)
            .finish_non_exhaustive()
    }
}
