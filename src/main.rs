// multivalue - keys that hold sets of members, driven from the terminal
//
// This is the main entry point. Parses CLI flags, sets up logging and config,
// then hands stdin/stdout to the interpreter loop.

use anyhow::Context;
use multivalue_lib::{
    core::{Dispatcher, Session},
    MultiValueStore, ReplConfig,
};
use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// Bad command-line usage, as opposed to a runtime failure (1)
const USAGE_EXIT_CODE: u8 = 2;

#[derive(Debug, PartialEq, Eq)]
struct Options {
    config_path: Option<PathBuf>,
    quiet: bool,
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => return ExitCode::SUCCESS,
        Err(flag) => {
            eprintln!("Unknown option: {}", flag);
            print_usage();
            return ExitCode::from(USAGE_EXIT_CODE);
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(options: Options) -> anyhow::Result<()> {
    let mut config =
        ReplConfig::load(options.config_path.as_deref()).context("failed to load config")?;
    if options.quiet {
        config = config.with_show_prompt(false);
    }

    let mut session = Session::new(Dispatcher::new(MultiValueStore::new()), config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    session
        .run(stdin.lock(), stdout.lock())
        .context("session aborted")?;

    Ok(())
}

// Logs go to stderr so they never interleave with command output
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

/// `Ok(None)` means the flag was fully handled (help/version) and we should stop.
/// `Err` carries the offending flag.
fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options {
        config_path: None,
        quiet: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                match args.get(i) {
                    Some(path) => options.config_path = Some(PathBuf::from(path)),
                    None => return Err(args[i - 1].clone()),
                }
            }
            "--quiet" | "-q" => options.quiet = true,
            "--version" | "-v" => {
                println!("multivalue v{}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            other => return Err(other.to_string()),
        }
        i += 1;
    }

    Ok(Some(options))
}

fn print_usage() {
    println!(
        r#"multivalue v{} - a store of keys that each hold a set of members

USAGE:
    multivalue [OPTIONS]

OPTIONS:
    -c, --config <path>    Read config from <path> (default: ~/.multivalue/config.json)
    -q, --quiet            Don't print a prompt
    -v, --version          Show version
    -h, --help             Show this help

COMMANDS (one per line on stdin, action is case-insensitive):
    ADD <key> <member>             Add a member to a key
    REMOVE <key> <member>          Remove a member from a key
    REMOVEALL <key>                Remove a key and all its members
    CLEAR                          Remove everything
    KEYS                           List keys
    MEMBERS <key>                  List a key's members
    KEYEXISTS <key>                Check for a key
    MEMBEREXISTS <key> <member>    Check for a member of a key
    ALLMEMBERS                     List every member of every key
    ITEMS                          List every key: member pair
    EXIT                           Quit

ENVIRONMENT:
    MULTIVALUE_PROMPT    Overrides the prompt
    RUST_LOG             Log filter (logs go to stderr)
"#,
        env!("CARGO_PKG_VERSION")
    );
}
