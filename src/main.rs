use clap::{Arg, Command};
use dotenv::dotenv;
use post_stubs::LoggingConfig;
use std::path::PathBuf;
use std::process;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let matches = build_cli().get_matches();

    if let Err(e) = run_command(matches) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("post-stubs")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate empty front-matter post stubs from a class schedule")
        .long_about(
            "Reads schedule lines such as 'Mon 1-29: Lecture' and writes one \
             '_posts/<year>-<MM>-<day>.md' stub per line",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("generate")
                .about("Write one stub file per schedule line")
                .arg(input_arg())
                .arg(
                    Arg::new("posts-dir")
                        .short('d')
                        .long("posts-dir")
                        .help("Directory the stubs are written to [default: _posts]")
                        .value_parser(clap::value_parser!(PathBuf))
                )
                .arg(
                    Arg::new("year")
                        .short('y')
                        .long("year")
                        .help("Year used in stub file names [default: 2024]")
                        .value_parser(clap::value_parser!(i32))
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Reject dates that do not exist or do not fall on the given weekday")
                        .action(clap::ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("keep-going")
                        .long("keep-going")
                        .help("Report failed stubs at the end instead of stopping at the first one")
                        .action(clap::ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("create-dir")
                        .long("create-dir")
                        .help("Create the posts directory if it is missing")
                        .action(clap::ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Parse and print schedule lines but don't write files")
                        .action(clap::ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("list")
                .about("Print parsed schedule lines without writing anything")
                .arg(input_arg())
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .help("Output format")
                        .value_parser(["plain", "json"])
                        .default_value("plain")
                )
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Config file (defaults to ./post_stubs.toml when present)")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Verbose logging")
                .global(true)
                .action(clap::ArgAction::SetTrue)
        )
}

fn input_arg() -> Arg {
    Arg::new("input")
        .short('i')
        .long("input")
        .help("Schedule file, or '-' for stdin (defaults to the built-in schedule)")
        .value_parser(clap::value_parser!(PathBuf))
}

fn run_command(matches: clap::ArgMatches) -> anyhow::Result<()> {
    let config = cli::load_config(&matches)?;
    initialize_logging(&config.logging, matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("generate", sub_matches)) => {
            cli::commands::generate::handle_generate(sub_matches, &config)?
        }
        Some(("list", sub_matches)) => {
            cli::commands::list::handle_list(sub_matches, &config)?
        }
        Some((other, _)) => anyhow::bail!("Unknown command: {}", other),
        None => anyhow::bail!("No command given, see --help"),
    }

    Ok(())
}

/// Initialize the logging system. Logs go to stderr so stdout only carries
/// schedule output. `RUST_LOG` wins over the configured level.
fn initialize_logging(logging: &LoggingConfig, verbose: bool) {
    let (filter, rejected_level) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => configured_filter(logging, verbose),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().init(),
        "pretty" => builder.pretty().init(),
        _ => builder.compact().init(),
    }

    if let Some(level) = rejected_level {
        warn!("Invalid logging.level {:?}, using {}", level, FALLBACK_LOG_LEVEL);
    }
}

const FALLBACK_LOG_LEVEL: &str = "warn";

/// Filter from the config file level, or `debug` with `--verbose`. Returns
/// the rejected level alongside the fallback filter when it does not parse.
fn configured_filter(logging: &LoggingConfig, verbose: bool) -> (EnvFilter, Option<String>) {
    let level = if verbose { "debug" } else { logging.level.as_str() };

    match EnvFilter::try_new(format!("post_stubs={}", level)) {
        Ok(filter) => (filter, None),
        Err(_) => (
            EnvFilter::new(format!("post_stubs={}", FALLBACK_LOG_LEVEL)),
            Some(level.to_string()),
        ),
    }
}
