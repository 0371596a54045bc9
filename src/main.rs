mod config;
mod document;
mod error;
mod patch;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::filter::LevelFilter;

use crate::config::SCRIPT_NAME;
use crate::patch::ConfigPatcher;

fn cli() -> Command {
    Command::new("fix-package-json")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sets the Cloudflare build script in frontend/project-01/package.json")
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Report what would change without writing the file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more to stderr (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_logging(matches: &ArgMatches) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level(matches.get_count("verbose")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(&matches)?;

    let patcher = ConfigPatcher::default();

    if matches.get_flag("dry-run") {
        let outcome = patcher
            .plan()
            .with_context(|| format!("Failed to check {}", patcher.path().display()))?;

        if !outcome.changed {
            println!("{SCRIPT_NAME} is already up to date, nothing to do");
        } else {
            println!("{SCRIPT_NAME} would be updated (dry run, nothing written)");
        }
        return Ok(());
    }

    patcher
        .run()
        .with_context(|| format!("Failed to patch {}", patcher.path().display()))?;

    println!("✅ package.json updated");
    Ok(())
}
