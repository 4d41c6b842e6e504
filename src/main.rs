//! taglog - tag-filtered line logger
//!
//! Usage:
//!   taglog -t net < input.txt          Log each stdin line as `net: <line>`
//!   taglog -m "hello" -m "world"       Log messages with the default tag
//!   taglog -c taglog.toml --scheme quiet
//!   taglog init-config [PATH]          Write a default config file
//!   taglog -c taglog.toml schemes      List configured schemes

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead};
use taglog::cli::{Cli, Command};
use taglog::config::{self, Config, Flavor};
use taglog::{diagnostics, export, Logger};

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init_tracing(cli.verbose);

    match &cli.command {
        Some(Command::InitConfig { path }) => {
            config::save(&Config::default(), path)?;
            eprintln!("Wrote {}", path.display());
            return Ok(());
        }
        Some(Command::Schemes) => {
            for name in load_config(&cli)?.scheme_names() {
                println!("{}", name);
            }
            return Ok(());
        }
        None => {}
    }

    let config = load_config(&cli)?;
    let logger = build_logger(&cli, &config)?;

    if cli.message.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read stdin")?;
            log_line(&cli, &logger, &line);
        }
    } else {
        for message in &cli.message {
            log_line(&cli, &logger, message);
        }
    }

    if cli.history {
        eprint!("{}", logger.exportable_text());
    }

    if let Some(dir) = &cli.export_dir {
        let path = export::write_export(&logger.export_draft(), dir)?;
        eprintln!("Exported to {}", path.display());
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config::load(path)?,
        None => Config::default(),
    };
    if cli.dragon {
        config.logger.flavor = Flavor::DragonLog;
    }
    Ok(config)
}

fn build_logger(cli: &Cli, config: &Config) -> Result<Logger> {
    let logger = Logger::new(&config.logger);

    if let Some(name) = &cli.scheme {
        let scheme = config
            .scheme(name)
            .with_context(|| format!("Cannot load scheme '{}'", name))?;
        logger.load_scheme(&scheme);
    }

    for tag in &cli.disable {
        logger.set_tag(tag, false);
    }
    if !cli.solo.is_empty() {
        logger.solo_tags(cli.solo.iter().cloned());
    }
    if cli.mute {
        logger.mute();
    }

    Ok(logger)
}

fn log_line(cli: &Cli, logger: &Logger, message: &str) {
    match (&cli.tag, cli.err) {
        (Some(tag), false) => logger.log(message, tag, &logger.out_sink()),
        (Some(tag), true) => logger.log(message, tag, &logger.err_sink()),
        (None, false) => logger.log_default(message),
        (None, true) => logger.log_err(message),
    }
}
