//! Parameter registry.
//!
//! Owns every descriptor in an arena indexed by [`ParamId`] and checks the
//! naming and ordering invariants when a descriptor is added. Nothing is ever
//! removed, so ids stay valid for the registry's lifetime.

use std::collections::HashMap;
use tracing::debug;

use crate::error::{BlockerKind, RegistrationError};
use crate::param::{Kind, Param};

/// Stable handle to a registered parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(usize);

impl ParamId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Short names must be printable ASCII, excluding space.
pub fn is_valid_short_name(short_name: char) -> bool {
    let code = short_name as u32;
    code > 32 && code <= 127
}

#[derive(Debug, Default)]
pub struct Registry<'a> {
    params: Vec<Param<'a>>,
    by_long_name: HashMap<String, ParamId>,
    by_short_name: HashMap<char, ParamId>,
    named: Vec<ParamId>,
    positional: Vec<ParamId>,
}

impl<'a> Registry<'a> {
    pub fn new() -> Self {
        Self {
            params: Vec::new(),
            by_long_name: HashMap::new(),
            by_short_name: HashMap::new(),
            named: Vec::new(),
            positional: Vec::new(),
        }
    }

    /// Registers a parameter matched by `--long-name` or `-s`.
    pub fn register_named(&mut self, param: Param<'a>) -> Result<ParamId, RegistrationError> {
        if let Some(short_name) = param.short_name() {
            if !is_valid_short_name(short_name) {
                return Err(RegistrationError::InvalidShortName {
                    long_name: param.long_name().to_string(),
                    short_name,
                });
            }
        }
        self.check_long_name(&param)?;
        if let Some(short_name) = param.short_name() {
            if self.by_short_name.contains_key(&short_name) {
                return Err(RegistrationError::DuplicateShortName(param.label()));
            }
        }

        let id = self.push(param, Kind::Named);
        let param = &self.params[id.0];
        self.by_long_name.insert(param.long_name().to_string(), id);
        if let Some(short_name) = param.short_name() {
            self.by_short_name.insert(short_name, id);
        }
        self.named.push(id);

        debug!("Registered named parameter {}", param.label());
        Ok(id)
    }

    /// Registers the next positional parameter.
    ///
    /// Only the last positional may be optional or a list: once either is
    /// registered, every further positional registration fails.
    pub fn register_positional(
        &mut self,
        mut param: Param<'a>,
    ) -> Result<ParamId, RegistrationError> {
        let position = self.positional.len() + 1;
        param.set_kind(Kind::Positional(position));

        if param.is_flag() {
            return Err(RegistrationError::FlagPositional(param.label()));
        }
        if let Some(short_name) = param.short_name() {
            return Err(RegistrationError::InvalidShortName {
                long_name: param.long_name().to_string(),
                short_name,
            });
        }
        self.check_long_name(&param)?;

        if let Some(last) = self.positional.last().map(|id| &self.params[id.0]) {
            let blocker_kind = if last.is_optional() {
                Some(BlockerKind::Optional)
            } else if last.is_list() {
                Some(BlockerKind::List)
            } else {
                None
            };
            if let Some(blocker_kind) = blocker_kind {
                return Err(RegistrationError::PositionalOrderViolation {
                    blocker: last.label(),
                    blocker_kind,
                    rejected: param.label(),
                });
            }
        }

        let id = self.push(param, Kind::Positional(position));
        self.positional.push(id);

        debug!("Registered positional parameter {}", self.params[id.0].label());
        Ok(id)
    }

    fn check_long_name(&self, param: &Param<'a>) -> Result<(), RegistrationError> {
        if param.long_name().chars().count() < 2 {
            return Err(RegistrationError::LongNameTooShort(param.label()));
        }
        let taken = self.by_long_name.contains_key(param.long_name())
            || self
                .positional_params()
                .any(|p| p.long_name() == param.long_name());
        if taken {
            return Err(RegistrationError::DuplicateLongName(param.label()));
        }
        Ok(())
    }

    fn push(&mut self, mut param: Param<'a>, kind: Kind) -> ParamId {
        param.set_kind(kind);
        let id = ParamId(self.params.len());
        self.params.push(param);
        id
    }

    /// Looks up a named parameter. Positional parameters are not reachable by name.
    pub fn lookup_long(&self, long_name: &str) -> Option<ParamId> {
        self.by_long_name.get(long_name).copied()
    }

    pub fn lookup_short(&self, short_name: char) -> Option<ParamId> {
        self.by_short_name.get(&short_name).copied()
    }

    pub fn get(&self, id: ParamId) -> &Param<'a> {
        &self.params[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: ParamId) -> &mut Param<'a> {
        &mut self.params[id.0]
    }

    /// Named parameter ids in registration order.
    pub fn named(&self) -> &[ParamId] {
        &self.named
    }

    /// Positional parameter ids in position order.
    pub fn positional(&self) -> &[ParamId] {
        &self.positional
    }

    pub fn named_params(&self) -> impl Iterator<Item = &Param<'a>> + '_ {
        self.named.iter().map(move |id| &self.params[id.0])
    }

    pub fn positional_params(&self) -> impl Iterator<Item = &Param<'a>> + '_ {
        self.positional.iter().map(move |id| &self.params[id.0])
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Clears the per-invocation match state of every parameter.
    pub(crate) fn reset_matches(&mut self) {
        for param in &mut self.params {
            param.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;

    #[test]
    fn indexes_named_parameters() {
        let name = RefCell::new(String::new());
        let force = RefCell::new(false);
        let mut registry = Registry::new();

        let name_id = registry
            .register_named(Param::value("name", &name).short('n'))
            .unwrap();
        let force_id = registry.register_named(Param::flag("force", &force)).unwrap();

        assert_eq!(registry.lookup_long("name"), Some(name_id));
        assert_eq!(registry.lookup_short('n'), Some(name_id));
        assert_eq!(registry.lookup_long("force"), Some(force_id));
        assert_eq!(registry.lookup_short('f'), None);
        assert_eq!(registry.lookup_long("missing"), None);
        assert_eq!(registry.named(), &[name_id, force_id]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_long_name_fails_regardless_of_shape() {
        let a = RefCell::new(0);
        let b = RefCell::new(Vec::<String>::new());
        let mut registry = Registry::new();
        registry.register_named(Param::value("string1", &a).short('s')).unwrap();

        let err = registry
            .register_named(Param::list("string1", &b).optional())
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::DuplicateLongName(label) if label.long_name == "string1"
        ));

        let err = registry.register_positional(Param::list("string1", &b)).unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateLongName(_)));
    }

    #[test]
    fn duplicate_short_name_fails() {
        let a = RefCell::new(0);
        let b = RefCell::new(0);
        let mut registry = Registry::new();
        registry.register_named(Param::value("string1", &a).short('s')).unwrap();

        let err = registry
            .register_named(Param::value("string2", &b).short('s'))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::DuplicateShortName(label) if label.short_name == Some('s')
        ));
        assert_eq!(registry.lookup_long("string2"), None);
    }

    #[test]
    fn long_name_needs_two_characters() {
        let s = RefCell::new(String::new());
        let mut registry = Registry::new();
        let err = registry.register_named(Param::value("s", &s)).unwrap_err();
        assert!(matches!(err, RegistrationError::LongNameTooShort(_)));
        assert!(registry.is_empty());
    }

    #[rstest]
    #[case('\u{1}')]
    #[case(' ')]
    #[case('\u{80}')]
    #[case('é')]
    fn rejects_unprintable_short_names(#[case] short_name: char) {
        let i = RefCell::new(0);
        let mut registry = Registry::new();
        let err = registry
            .register_named(Param::value("param", &i).short(short_name))
            .unwrap_err();
        assert_eq!(
            err,
            RegistrationError::InvalidShortName {
                long_name: "param".to_string(),
                short_name
            }
        );
    }

    #[rstest]
    #[case('!')]
    #[case('3')]
    #[case('~')]
    #[case('\u{7f}')]
    fn accepts_printable_short_names(#[case] short_name: char) {
        assert!(is_valid_short_name(short_name));
    }

    #[test]
    fn required_then_optional_positional_is_valid() {
        let a = RefCell::new(0);
        let b = RefCell::new(0);
        let mut registry = Registry::new();
        let first = registry.register_positional(Param::value("first", &a)).unwrap();
        let second = registry
            .register_positional(Param::value("second", &b).optional())
            .unwrap();
        assert_eq!(registry.get(first).position(), Some(1));
        assert_eq!(registry.get(second).position(), Some(2));
        assert_eq!(registry.lookup_long("first"), None);
    }

    #[test]
    fn nothing_follows_an_optional_positional() {
        let i1 = RefCell::new(0);
        let i2 = RefCell::new(0);
        let list2 = RefCell::new(Vec::<i32>::new());
        let mut registry = Registry::new();
        registry.register_positional(Param::value("i1", &i1).optional()).unwrap();

        for param in [
            Param::value("i2", &i2),
            Param::value("i2", &i2).optional(),
            Param::list("list2", &list2),
            Param::list("list2", &list2).optional(),
        ] {
            let err = registry.register_positional(param).unwrap_err();
            assert!(matches!(
                err,
                RegistrationError::PositionalOrderViolation {
                    blocker_kind: BlockerKind::Optional,
                    ..
                }
            ));
        }
        assert_eq!(registry.positional().len(), 1);
    }

    #[test]
    fn nothing_follows_a_positional_list() {
        let list1 = RefCell::new(Vec::<i32>::new());
        let int2 = RefCell::new(0);
        let mut registry = Registry::new();
        registry.register_positional(Param::list("list1", &list1)).unwrap();

        let err = registry.register_positional(Param::value("int2", &int2)).unwrap_err();
        match err {
            RegistrationError::PositionalOrderViolation {
                blocker,
                blocker_kind,
                rejected,
            } => {
                assert_eq!(blocker.long_name, "list1");
                assert_eq!(blocker_kind, BlockerKind::List);
                assert_eq!(rejected.position, Some(2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn scalar_then_list_positional_is_valid() {
        let a = RefCell::new(String::new());
        let rest = RefCell::new(Vec::<String>::new());
        let mut registry = Registry::new();
        registry.register_positional(Param::value("first", &a)).unwrap();
        registry.register_positional(Param::list("rest", &rest)).unwrap();
        assert_eq!(registry.positional().len(), 2);
    }

    #[test]
    fn flags_cannot_be_positional() {
        let force = RefCell::new(false);
        let mut registry = Registry::new();
        let err = registry.register_positional(Param::flag("force", &force)).unwrap_err();
        assert!(matches!(err, RegistrationError::FlagPositional(_)));
    }

    #[test]
    fn positional_parameters_take_no_short_name() {
        let file = RefCell::new(String::new());
        let mut registry = Registry::new();
        let err = registry
            .register_positional(Param::value("file", &file).short('f'))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidShortName { short_name: 'f', .. }));
    }
}
