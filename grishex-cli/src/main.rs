//! Command-line interface for grishex
//! Scans grishex sources and prints tokens, structure and diagnostics.
//!
//! Usage:
//!   grishex tokens `<path|->` [--format table|simple|json] [--no-whitespace]
//!   grishex structure `<path|->`    - Bracket pairs, folds and structural diagnostics as JSON
//!   grishex check `<path|->`        - Compiler-style diagnostics, exit 1 on errors
//!   grishex language                - Editing metadata as JSON
//!
//! Global flags: --config `<file>` layers a configuration file, --tab-size `<n>` overrides
//! `folding.tab_size`. `./grishex.toml` is picked up when present.

mod commands;
mod error;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::Input;
use error::CliError;
use grishex_config::{GrishexConfig, Loader, TokenFormat, PROJECT_CONFIG_FILE};
use std::process::ExitCode;

fn build_cli() -> Command {
    let path_arg = || {
        Arg::new("path")
            .help("Path to the grishex file, or - for stdin")
            .required(true)
            .index(1)
    };

    Command::new("grishex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Lexical analysis for grishex contract sources")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_name("FILE")
                .help("Configuration file layered over ./grishex.toml and the defaults"),
        )
        .arg(
            Arg::new("tab-size")
                .long("tab-size")
                .global(true)
                .value_name("N")
                .value_parser(value_parser!(u32))
                .help("Columns a tab advances to when comparing indentation"),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: table, simple or json (default from configuration)"),
                )
                .arg(
                    Arg::new("no-whitespace")
                        .long("no-whitespace")
                        .help("Leave whitespace tokens out")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("structure")
                .about("Print bracket pairs, fold ranges and structural diagnostics as JSON")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Report diagnostics; exits with 1 when any error is found")
                .arg(path_arg()),
        )
        .subcommand(Command::new("language").about("Print the language configuration as JSON"))
}

fn load_config(matches: &ArgMatches) -> Result<GrishexConfig, CliError> {
    let mut loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(&tab_size) = matches.get_one::<u32>("tab-size") {
        loader = loader.set_override("folding.tab_size", i64::from(tab_size))?;
    }
    Ok(loader.build()?)
}

fn path_input(matches: &ArgMatches) -> Result<Input, CliError> {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    commands::read_input(path)
}

fn run(matches: &ArgMatches) -> Result<ExitCode, CliError> {
    let (name, sub) = match matches.subcommand() {
        Some(pair) => pair,
        None => return Ok(ExitCode::SUCCESS),
    };

    if name == "language" {
        print!("{}", commands::language()?);
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(sub)?;
    let input = path_input(sub)?;

    match name {
        "tokens" => {
            let format = match sub.get_one::<String>("format") {
                Some(name) => name
                    .parse::<TokenFormat>()
                    .map_err(|err| CliError::UnknownFormat(err.to_string()))?,
                None => config.output.format,
            };
            let include_whitespace = !sub.get_flag("no-whitespace");
            print!(
                "{}",
                commands::tokens(&input, &config, format, include_whitespace)?
            );
        }
        "structure" => print!("{}", commands::structure(&input, &config)?),
        "check" => {
            let report = commands::check(&input, &config);
            print!("{}", report.output);
            if report.has_errors {
                return Ok(ExitCode::from(1));
            }
        }
        _ => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    grishex_config::logging::init_tracing();

    let matches = build_cli().get_matches();
    match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn global_flags_reach_subcommands() {
        let matches = build_cli()
            .try_get_matches_from(["grishex", "structure", "a.grx", "--tab-size", "2"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<u32>("tab-size"), Some(&2));
        assert_eq!(sub.get_one::<String>("path").map(String::as_str), Some("a.grx"));
    }
}
