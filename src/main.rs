mod cli;
mod demo;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, ColorMode, Command};
use termkit::format;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    match cli.color {
        ColorMode::Auto => termkit::init(),
        ColorMode::Always => termkit::set_color(true),
        ColorMode::Never => termkit::set_color(false),
    }

    match cli.command {
        Command::Size { bytes } => println!("{}", format::human_size(bytes)),
        Command::Parse { text } => {
            let bytes = format::parse_size(&text)
                .with_context(|| format!("Could not parse size '{text}'"))?;
            println!("{bytes}");
        }
        Command::Duration { millis } => {
            println!("{}", format::human_duration(Duration::from_millis(millis)));
        }
        Command::Count { n } => println!("{}", format::human_count(n)),
        Command::Truncate { path, max } => println!("{}", format::truncate_path(&path, max)),
        Command::Demo(cmd) => demo::run(cmd),
    }

    Ok(())
}
