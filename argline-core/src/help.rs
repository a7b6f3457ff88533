//! Help text rendering: a wrapped usage synopsis and an aligned option table.

use crate::layout::HelpLayout;
use crate::param::Param;
use crate::registry::Registry;

const USAGE_PREFIX: &str = "Usage: ";

/// Renders help from the current contents of a registry.
pub struct HelpRenderer<'r, 'a> {
    registry: &'r Registry<'a>,
    program: &'r str,
    layout: HelpLayout,
}

impl<'r, 'a> HelpRenderer<'r, 'a> {
    pub fn new(registry: &'r Registry<'a>, program: &'r str, layout: HelpLayout) -> Self {
        Self {
            registry,
            program,
            layout,
        }
    }

    /// The usage synopsis, e.g. `Usage: prog (-n <name> | --name <name>) [-f | --force] <file>`.
    ///
    /// Fragments that would cross the layout width move to a new line,
    /// indented so they line up under the first fragment.
    pub fn usage(&self) -> String {
        let mut output = format!("{}{}", USAGE_PREFIX, self.program);
        let indent = text_width(&output);
        let mut width = indent;

        let fragments = self
            .registry
            .named_params()
            .map(named_fragment)
            .chain(self.registry.positional_params().map(positional_fragment));

        for fragment in fragments {
            let fragment_width = text_width(&fragment);
            if width + fragment_width > self.layout.width {
                output.push('\n');
                output.push_str(&" ".repeat(indent));
                width = indent;
            }
            output.push_str(&fragment);
            width += fragment_width;
        }

        output.push('\n');
        output
    }

    /// The option table, one row per named parameter then per positional one.
    pub fn options(&self) -> String {
        let rows: Vec<(String, &Param<'a>)> = self
            .registry
            .named_params()
            .map(|param| (named_signature(param), param))
            .chain(
                self.registry
                    .positional_params()
                    .map(|param| (format!("<{}>", param.long_name()), param)),
            )
            .collect();

        let signature_width = rows
            .iter()
            .map(|(signature, _)| text_width(signature))
            .max()
            .unwrap_or(0);
        let help_column = signature_width + self.layout.indent + 1;

        let mut output = String::from("Options:\n");
        for (signature, param) in &rows {
            let cell = format!("{}{}", " ".repeat(self.layout.indent), signature);
            output.push_str(&pad(&cell, help_column));
            output.push_str(param.help_text());
            if let Some(values) = param.valid_values() {
                output.push_str(". Valid values: ");
                output.push_str(&values.join(", "));
            }
            output.push('\n');
        }
        output
    }
}

/// ` (-s <name> | --name <name>)`, ` [--name <name> ...]`, ` [-f | --flag]`
fn named_fragment(param: &Param<'_>) -> String {
    let name = param.long_name();
    let mut fragment = String::from(" ");

    if param.is_optional() {
        fragment.push('[');
    } else if param.short_name().is_some() {
        fragment.push('(');
    }

    if let Some(short_name) = param.short_name() {
        if param.is_flag() {
            fragment.push_str(&format!("-{} | ", short_name));
        } else {
            fragment.push_str(&format!("-{} <{}> | ", short_name, name));
        }
    }

    fragment.push_str(&format!("--{}", name));
    if !param.is_flag() {
        fragment.push_str(&format!(" <{}>", name));
    }
    if param.is_list() {
        fragment.push_str(" ...");
    }

    if param.is_optional() {
        fragment.push(']');
    } else if param.short_name().is_some() {
        fragment.push(')');
    }
    fragment
}

/// ` <name>`, ` [<name>]`, ` <name> ...`
fn positional_fragment(param: &Param<'_>) -> String {
    let mut fragment = format!("<{}>", param.long_name());
    if param.is_list() {
        fragment.push_str(" ...");
    }
    if param.is_optional() {
        fragment = format!("[{}]", fragment);
    }
    format!(" {}", fragment)
}

/// `-s, --name <name>` in the option table
fn named_signature(param: &Param<'_>) -> String {
    let mut signature = String::new();
    if let Some(short_name) = param.short_name() {
        signature.push_str(&format!("-{}, ", short_name));
    }
    signature.push_str(&format!("--{}", param.long_name()));
    if !param.is_flag() {
        signature.push_str(&format!(" <{}>", param.long_name()));
    }
    signature
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text_width(text));
    format!("{}{}", text, " ".repeat(padding))
}
