//! The parser facade: a registry plus the program name, description and
//! help layout used when rendering help.

use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;

use crate::error::{ParseError, RegistrationError, Result};
use crate::help::HelpRenderer;
use crate::layout::HelpLayout;
use crate::matcher::match_tokens;
use crate::param::Param;
use crate::registry::{ParamId, Registry};

/// Command line parser.
///
/// Parameters bind caller-owned `RefCell` storage borrowed for `'a`, so the
/// storage always outlives the parser and every `parse` call made through it.
/// Read bound values with `RefCell::borrow` between calls.
///
/// ```
/// use std::cell::RefCell;
/// use argline_core::{Param, Parser};
///
/// let name = RefCell::new(String::new());
/// let force = RefCell::new(false);
///
/// let mut parser = Parser::new("Greets someone").program("greet");
/// parser.add_named(Param::value("name", &name).short('n').help("Who to greet")).unwrap();
/// parser.add_named(Param::flag("force", &force).short('f').help("Greet twice")).unwrap();
///
/// parser.parse(["--name", "Alice", "-f"]).unwrap();
/// assert_eq!(*name.borrow(), "Alice");
/// assert!(*force.borrow());
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    description: String,
    program: String,
    layout: HelpLayout,
    registry: Registry<'a>,
}

impl<'a> Parser<'a> {
    /// Creates an empty parser. The program name defaults to the base name
    /// of the running executable.
    pub fn new(description: impl Into<String>) -> Self {
        let program = std::env::args_os()
            .next()
            .map(|arg0| program_name(&arg0))
            .unwrap_or_default();

        Self {
            description: description.into(),
            program,
            layout: HelpLayout::default(),
            registry: Registry::new(),
        }
    }

    /// Sets the program name shown in the usage line.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn layout(mut self, layout: HelpLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn program_name(&self) -> &str {
        &self.program
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    pub fn add_named(
        &mut self,
        param: Param<'a>,
    ) -> std::result::Result<ParamId, RegistrationError> {
        self.registry.register_named(param)
    }

    pub fn add_positional(
        &mut self,
        param: Param<'a>,
    ) -> std::result::Result<ParamId, RegistrationError> {
        self.registry.register_positional(param)
    }

    pub fn lookup_long(&self, long_name: &str) -> Option<&Param<'a>> {
        self.registry.lookup_long(long_name).map(|id| self.registry.get(id))
    }

    pub fn lookup_short(&self, short_name: char) -> Option<&Param<'a>> {
        self.registry.lookup_short(short_name).map(|id| self.registry.get(id))
    }

    pub fn param(&self, id: ParamId) -> &Param<'a> {
        self.registry.get(id)
    }

    /// Runs one matching invocation over `tokens`, which must not include
    /// the program name.
    ///
    /// On error, values converted before the failing token stay bound.
    pub fn parse<I, S>(&mut self, tokens: I) -> std::result::Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match_tokens(&mut self.registry, tokens)
    }

    /// Like [`Parser::parse`], for tokens that may not be valid UTF-8.
    ///
    /// Every token is checked before matching starts, so an invalid one
    /// fails with [`ParseError::InvalidEncoding`] and binds nothing.
    pub fn parse_os<I, S>(&mut self, tokens: I) -> std::result::Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let tokens = tokens
            .into_iter()
            .map(|token| {
                let token = token.as_ref();
                token.to_str().map(str::to_string).ok_or_else(|| {
                    ParseError::InvalidEncoding(token.to_string_lossy().into_owned())
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.parse(tokens)
    }

    /// Parses the process arguments, taking the program name from the first one.
    pub fn parse_env(&mut self) -> std::result::Result<(), ParseError> {
        let mut args = std::env::args_os();
        if let Some(arg0) = args.next() {
            self.program = program_name(&arg0);
        }
        self.parse_os(args)
    }

    fn renderer(&self) -> HelpRenderer<'_, 'a> {
        HelpRenderer::new(&self.registry, &self.program, self.layout)
    }

    pub fn usage(&self) -> String {
        self.renderer().usage()
    }

    pub fn options(&self) -> String {
        self.renderer().options()
    }

    /// Description, usage and option table.
    pub fn help(&self) -> String {
        format!("{}\n\n{}{}", self.description, self.usage(), self.options())
    }

    pub fn write_description<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "{}\n\n", self.description)?;
        Ok(())
    }

    pub fn write_usage<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(self.usage().as_bytes())?;
        Ok(())
    }

    pub fn write_options<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(self.options().as_bytes())?;
        Ok(())
    }

    pub fn write_help<W: Write>(&self, out: &mut W) -> Result<()> {
        self.write_description(out)?;
        self.write_usage(out)?;
        self.write_options(out)?;
        out.flush()?;
        Ok(())
    }
}

/// Base name of `argv[0]`.
fn program_name(arg0: &OsStr) -> String {
    Path::new(arg0)
        .file_name()
        .unwrap_or(arg0)
        .to_string_lossy()
        .into_owned()
}
