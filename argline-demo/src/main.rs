use anyhow::Result;
use argline_core::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::cell::RefCell;
use std::fmt::Debug;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod values;
use values::Values;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Value0,
    Value1,
    Value2,
}

fn levels() -> [(&'static str, Level); 2] {
    [("value1", Level::Value1), ("value2", Level::Value2)]
}

fn main() -> Result<ExitCode> {
    let filter = EnvFilter::try_from_env("ARGLINE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let values = Values::default();
    let mut parser = build_parser(&values)?;

    if let Err(err) = parser.parse_env() {
        // Flags before the failing token are still bound, so `--help` works
        // even when required arguments are missing.
        if *values.help.borrow() {
            parser.write_help(&mut std::io::stdout())?;
            return Ok(ExitCode::SUCCESS);
        }
        eprintln!("{}", err);
        parser.write_usage(&mut std::io::stderr())?;
        return Ok(ExitCode::from(2));
    }
    debug!("Parsed command line for {}", parser.program_name());

    if *values.help.borrow() {
        parser.write_help(&mut std::io::stdout())?;
    } else if *values.json.borrow() {
        println!("{}", serde_json::to_string_pretty(&report(&values))?);
    } else {
        print_values(&values);
    }
    Ok(ExitCode::SUCCESS)
}

fn build_parser(values: &Values) -> argline_core::Result<Parser<'_>> {
    let mut parser =
        Parser::new("Prints every value it was given, one parameter of each supported shape.");

    parser.add_named(Param::flag("help", &values.help).short('h').help("Show this help"))?;
    parser.add_named(Param::flag("json", &values.json).help("Print the values as JSON"))?;
    parser.add_named(Param::flag("flag", &values.flag).short('f').help("Flag"))?;

    parser.add_named(Param::value("string", &values.string).help("String"))?;
    parser.add_named(Param::value("integer", &values.integer).help("Integer"))?;
    parser.add_named(Param::choice("enum", &values.level, levels()).help("Enumeration"))?;

    parser.add_named(
        Param::value("optString", &values.opt_string)
            .optional()
            .help("Optional string"),
    )?;
    parser.add_named(
        Param::value("optInteger", &values.opt_integer)
            .optional()
            .help("Optional integer"),
    )?;
    parser.add_named(
        Param::choice("optEnum", &values.opt_level, levels())
            .optional()
            .help("Optional enumeration"),
    )?;

    parser.add_named(Param::list("strings", &values.strings).short('s').help("Strings"))?;
    parser.add_named(Param::list("integers", &values.integers).short('i').help("Integers"))?;
    parser.add_named(
        Param::choice_list("enums", &values.levels, levels())
            .short('e')
            .help("Enumerations"),
    )?;

    parser.add_named(
        Param::list("optStrings", &values.opt_strings)
            .optional()
            .help("Optional strings"),
    )?;
    parser.add_named(
        Param::list("optIntegers", &values.opt_integers)
            .optional()
            .help("Optional integers"),
    )?;
    parser.add_named(
        Param::choice_list("optEnums", &values.opt_levels, levels())
            .optional()
            .help("Optional enumerations"),
    )?;

    parser.add_positional(
        Param::value("positionalString", &values.positional_string).help("Positional string"),
    )?;
    parser.add_positional(
        Param::value("positionalInteger", &values.positional_integer).help("Positional integer"),
    )?;
    parser.add_positional(
        Param::choice_list("positionalEnums", &values.positional_levels, levels())
            .optional()
            .help("Positional enumerations"),
    )?;

    Ok(parser)
}

fn dump<T: Debug>(title: &str, value: &RefCell<T>) {
    println!("{}: {:?}", title, value.borrow());
}

fn print_values(values: &Values) {
    dump("Flag", &values.flag);
    dump("String", &values.string);
    dump("Integer", &values.integer);
    dump("Enumeration", &values.level);
    dump("Optional string", &values.opt_string);
    dump("Optional integer", &values.opt_integer);
    dump("Optional enumeration", &values.opt_level);
    dump("Strings", &values.strings);
    dump("Integers", &values.integers);
    dump("Enumerations", &values.levels);
    dump("Optional strings", &values.opt_strings);
    dump("Optional integers", &values.opt_integers);
    dump("Optional enumerations", &values.opt_levels);
    dump("Positional string", &values.positional_string);
    dump("Positional integer", &values.positional_integer);
    dump("Positional enumerations", &values.positional_levels);
}

fn report(values: &Values) -> serde_json::Value {
    json!({
        "flag": *values.flag.borrow(),
        "string": *values.string.borrow(),
        "integer": *values.integer.borrow(),
        "enum": *values.level.borrow(),
        "optString": *values.opt_string.borrow(),
        "optInteger": *values.opt_integer.borrow(),
        "optEnum": *values.opt_level.borrow(),
        "strings": *values.strings.borrow(),
        "integers": *values.integers.borrow(),
        "enums": *values.levels.borrow(),
        "optStrings": *values.opt_strings.borrow(),
        "optIntegers": *values.opt_integers.borrow(),
        "optEnums": *values.opt_levels.borrow(),
        "positionalString": *values.positional_string.borrow(),
        "positionalInteger": *values.positional_integer.borrow(),
        "positionalEnums": *values.positional_levels.borrow(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_registry_is_valid() {
        let values = Values::default();
        let parser = build_parser(&values).unwrap();
        assert_eq!(parser.registry().positional().len(), 3);
        assert!(parser.usage().starts_with("Usage: "));
    }

    #[test]
    fn parses_a_full_command_line() {
        let values = Values::default();
        let mut parser = build_parser(&values).unwrap();
        parser
            .parse([
                "--string", "s", "--integer", "1", "--enum", "value2", "-s", "a", "-s", "b",
                "-i", "3", "-e", "value1", "text", "42", "value2", "value1",
            ])
            .unwrap();

        let report = report(&values);
        assert_eq!(report["enum"], "value2");
        assert_eq!(report["strings"], json!(["a", "b"]));
        assert_eq!(report["positionalEnums"], json!(["value2", "value1"]));
        assert_eq!(report["optEnum"], "value0");
        assert_eq!(report["flag"], false);
    }

    #[test]
    fn help_flag_survives_missing_arguments() {
        let values = Values::default();
        let mut parser = build_parser(&values).unwrap();
        let err = parser.parse(["--help"]).unwrap_err();
        assert!(matches!(err, ParseError::MissingArgument(_)));
        assert!(*values.help.borrow());
    }
}
