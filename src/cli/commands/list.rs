use anyhow::Result;
use clap::ArgMatches;
use std::path::PathBuf;

use post_stubs::{Config, ScheduleParser, ScheduleSource};

/// Parse the schedule and print what would be generated, without touching
/// the posts directory.
pub fn handle_list(matches: &ArgMatches, config: &Config) -> Result<()> {
    let input = matches
        .get_one::<PathBuf>("input")
        .or(config.generator.input.as_ref());
    let format = matches
        .get_one::<String>("format")
        .map(|s| s.as_str())
        .unwrap_or("plain");

    let text = ScheduleSource::from_arg(input).read()?;
    let lines = ScheduleParser::new().parse(&text);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&lines)?),
        _ => {
            for line in &lines {
                println!("{}", line.diagnostic());
            }
        }
    }

    Ok(())
}
