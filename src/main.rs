mod debug_report;

use regexp_recognizer::{
    IntentDefinition, Options, PatternFlags, Registry, load_definitions, recognize_verbose,
};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{}", help_text());
            return;
        }
        Ok(Command::Version) => {
            println!("regexp-recognizer {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let input = match resolve_input(&args) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let registry = match build_registry(&args) {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let color = args.color.unwrap_or_else(|| io::stdout().is_terminal());
    let run = recognize_verbose(&registry, &input);
    debug_report::print_run(&input, &run, color);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

#[derive(Debug)]
enum Command {
    Run(CliArgs),
    Help,
    Version,
}

/// Parsed command line. `input` and `color` stay unset until `main` resolves
/// them against stdin and the terminal.
#[derive(Debug, Default)]
struct CliArgs {
    input: Option<String>,
    definitions: Vec<IntentDefinition>,
    flags: PatternFlags,
    options: Options,
    color: Option<bool>,
}

impl CliArgs {
    fn set_input(&mut self, value: String) -> Result<(), String> {
        if self.input.is_some() {
            return Err("error: input provided multiple times".to_string());
        }
        self.input = Some(value);
        Ok(())
    }
}

/// Options that take a value, either as the next argument or as `--flag=value`.
const VALUE_OPTIONS: &[&str] = &["--intent", "--intents", "--backtrack-limit", "--input"];

fn build_registry(args: &CliArgs) -> regexp_recognizer::Result<Registry> {
    let mut builder = Registry::builder().with_options(args.options.clone());
    for def in &args.definitions {
        builder = builder.add_definition(def, args.flags)?;
    }
    Ok(builder.build())
}

fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let (option, inline) = match arg.split_once('=') {
            Some((option, value)) if option.starts_with("--") => (option.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        if inline.is_some() && !VALUE_OPTIONS.contains(&option.as_str()) {
            return Err(format!("error: unknown option '{arg}'"));
        }

        match option.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--color" => cli.color = Some(true),
            "--no-color" => cli.color = Some(false),
            "--ignore-case" => cli.flags |= PatternFlags::IGNORE_CASE,
            "--intent" => {
                let value = option_value(&option, inline, &mut args)?;
                cli.definitions.push(parse_definition(&value)?);
            }
            "--intents" => {
                let path = option_value(&option, inline, &mut args)?;
                let defs = load_definitions(&path).map_err(|err| format!("error: {path}: {err}"))?;
                cli.definitions.extend(defs);
            }
            "--backtrack-limit" => {
                let value = option_value(&option, inline, &mut args)?;
                cli.options.backtrack_limit = parse_limit(&value)?;
            }
            "-i" | "--input" => {
                let value = option_value("--input", inline, &mut args)?;
                cli.set_input(value)?;
            }
            "--" => {
                let rest = args.by_ref().collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    cli.set_input(rest)?;
                }
                break;
            }
            _ if option.starts_with('-') => return Err(format!("error: unknown option '{arg}'")),
            _ => {
                let rest = std::iter::once(arg).chain(args.by_ref()).collect::<Vec<_>>().join(" ");
                cli.set_input(rest)?;
                break;
            }
        }
    }

    if cli.definitions.is_empty() {
        return Err(format!("error: no intents registered (use --intent or --intents)\n\n{}", help_text()));
    }
    Ok(Command::Run(cli))
}

fn option_value(option: &str, inline: Option<String>, rest: &mut impl Iterator<Item = String>) -> Result<String, String> {
    inline.or_else(|| rest.next()).ok_or_else(|| format!("error: {option} expects a value"))
}

/// Input from the command line, or all of stdin when none was given.
fn resolve_input(args: &CliArgs) -> Result<String, String> {
    let input = match &args.input {
        Some(value) => value.clone(),
        None => read_stdin_input()?,
    };
    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }
    Ok(input)
}

fn parse_definition(value: &str) -> Result<IntentDefinition, String> {
    value.parse::<IntentDefinition>().map_err(|err| format!("error: --intent '{value}': {err}"))
}

fn parse_limit(value: &str) -> Result<usize, String> {
    value.parse::<usize>().map_err(|_| format!("error: invalid --backtrack-limit '{value}' (expected a positive integer)"))
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
}

fn help_text() -> String {
    format!(
        "regexp-recognizer {version}

Regular-expression intent recognizer CLI.

Usage:
  regexp-recognizer [OPTIONS] --intent <def>... [--] <input...>
  regexp-recognizer [OPTIONS] --intents <file> --input <text>

Intent definitions:
  NAME[@SCORE]=PATTERN       e.g. HelpIntent=help  or  TacoIntent@0.5=tacos?
                             SCORE defaults to 1.0 and must be within [0, 1].

Options:
  --intent <def>             Register one intent. Repeatable.
  --intents <file>           Register every definition in <file>, one per line.
                             Blank lines and lines starting with '#' are skipped.
  --ignore-case              Compile all patterns case-insensitively.
  --backtrack-limit <n>      Backtracking budget for look-around/back-reference
                             patterns. Default: {default_limit}
  -i, --input <text>         Input text to recognize. If omitted, reads remaining
                             args or stdin when no args are provided.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter (default: warn), e.g. RUST_LOG=debug.

Exit codes:
  0  Success.
  1  Invalid intent definition or pattern.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_limit = Options::default().backtrack_limit
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, String> {
        match parse_args(args.iter().map(|a| a.to_string()))? {
            Command::Run(cli) => Ok(cli),
            other => Err(format!("unexpected {other:?}")),
        }
    }

    #[test]
    fn trailing_words_become_the_input() {
        let cli = parse(&["--intent", "HelpIntent=help", "--ignore-case", "please", "help", "me"]).unwrap();
        assert_eq!(cli.input.as_deref(), Some("please help me"));
        assert_eq!(cli.definitions[0].name, "HelpIntent");
        assert!(cli.flags.contains(PatternFlags::IGNORE_CASE));
        assert_eq!(cli.color, None);
    }

    #[test]
    fn inline_values_match_separate_values() {
        let split = parse(&["--intent", "Taco@0.5=tacos?", "--backtrack-limit", "50", "-i", "tacos"]).unwrap();
        let inline = parse(&["--intent=Taco@0.5=tacos?", "--backtrack-limit=50", "--input=tacos"]).unwrap();

        for cli in [split, inline] {
            assert_eq!(cli.definitions[0].pattern, "tacos?");
            assert_eq!(cli.definitions[0].score, 0.5);
            assert_eq!(cli.options.backtrack_limit, 50);
            assert_eq!(cli.input.as_deref(), Some("tacos"));
        }
    }

    #[test]
    fn double_dash_keeps_option_like_words() {
        let cli = parse(&["--intent=Dash=--", "--no-color", "--", "--not-an-option", "x"]).unwrap();
        assert_eq!(cli.input.as_deref(), Some("--not-an-option x"));
        assert_eq!(cli.color, Some(false));
    }

    #[test]
    fn input_may_only_be_given_once() {
        for args in [
            &["--intent=A=a", "-i", "one", "--input=two"][..],
            &["--intent=A=a", "--input", "one", "two"][..],
            &["--intent=A=a", "-i", "one", "--", "two"][..],
        ] {
            assert_eq!(parse(args).unwrap_err(), "error: input provided multiple times");
        }
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse(&["--intent=A=a", "--bogus"]).unwrap_err().contains("unknown option '--bogus'"));
        assert!(parse(&["--intent=A=a", "--color=always"]).unwrap_err().contains("unknown option"));
        assert!(parse(&["--intent"]).unwrap_err().contains("--intent expects a value"));
        assert!(parse(&["--intent=A=a", "--backtrack-limit=lots"]).unwrap_err().contains("invalid --backtrack-limit"));
        assert!(parse(&["just text"]).unwrap_err().contains("no intents registered"));
    }

    #[test]
    fn help_and_version_short_circuit() {
        let args = |list: &[&str]| parse_args(list.iter().map(|a| a.to_string()));
        assert!(args(&["--bogus-later", "-h"]).is_err());
        assert!(matches!(args(&["-h", "--bogus-later"]), Ok(Command::Help)));
        assert!(matches!(args(&["--version"]), Ok(Command::Version)));
    }
}
