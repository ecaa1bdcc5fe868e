//! geolink: command-line front end for geolink-core
//!
//! Links the records of a *needles* CSV file against a *haystack* CSV file
//! (both `id,country,province,city`, no header by default) and writes two
//! result sets: candidates for matched needles, and one row per unmatched
//! needle.
//!
//! Usage examples
//! --------------
//!
//! - Extended mode with the reference file names
//!   $ geolink link
//!
//! - Exact matches only
//!   $ geolink link --mode simple -n key_x.csv -s key_y.csv
//!
//! - Tighter threshold, accent-insensitive keys, four workers
//!   $ geolink link -t 2 --fold transliterate --threads 4
//!
//! - Inspect keys and distances
//!   $ geolink key France Ile-de-France Paris
//!   $ geolink distance "France Ile-de-France Paris" "France IledeFrance Parris"
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to see every
//! needle, `RUST_LOG=trace` for per-needle distance statistics.
mod args;

use crate::args::{CliArgs, Commands, FoldArg, LinkArgs};
use anyhow::Context;
use clap::Parser;
use geolink_core::prelude::*;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let mut config = load_config(args.config.as_deref())?;

    match args.command {
        Commands::Link(link) => {
            link.apply(&mut config);
            config.validate()?;
            run_link(&link, &config)?;
        }

        Commands::Distance { a, b, fold } => {
            let fold = fold_or(fold, config.fold);
            println!("{}", edit_distance(&fold.fold(&a), &fold.fold(&b)));
        }

        Commands::Key {
            country,
            province,
            city,
            fold,
        } => {
            let fold = fold_or(fold, config.fold);
            let key = build_key(&LocalityRecord::new("", country, province, city), fold);
            println!("Key: {}", key.raw());
            println!("Folded: {}", key.folded());
        }
    }

    Ok(())
}

fn fold_or(arg: Option<FoldArg>, fallback: FoldMode) -> FoldMode {
    arg.map(FoldMode::from).unwrap_or(fallback)
}

#[cfg(feature = "json")]
fn load_config(path: Option<&Path>) -> anyhow::Result<LinkConfig> {
    match path {
        Some(p) => LinkConfig::load_from_path(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(LinkConfig::default()),
    }
}

#[cfg(not(feature = "json"))]
fn load_config(path: Option<&Path>) -> anyhow::Result<LinkConfig> {
    if let Some(p) = path {
        anyhow::bail!(
            "cannot read {}: built without the 'json' feature",
            p.display()
        );
    }
    Ok(LinkConfig::default())
}

fn run_link(link: &LinkArgs, config: &LinkConfig) -> anyhow::Result<()> {
    let options = config.read_options();

    let haystack = Haystack::load_from_path(&link.haystack, options, config.fold)
        .with_context(|| format!("Failed to load haystack {}", link.haystack.display()))?;
    let needles = RecordReader::from_path(&link.needles, RecordSet::Needles, options)
        .with_context(|| format!("Failed to open needles {}", link.needles.display()))?;

    let (matched, unmatched) = link.output_paths(config.mode);
    let mut sink = CsvSink::new(&matched, &unmatched, config.mode == MatchMode::Extended);

    let linker = Linker::new(config, &haystack)?;
    let stats = linker.run(needles, &mut sink)?;

    log::info!("Wrote {} and {}", matched.display(), unmatched.display());
    print_stats(&stats, link.report_json)
}

fn print_stats(stats: &RunStats, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        #[cfg(feature = "json")]
        {
            println!("{}", serde_json::to_string_pretty(stats)?);
            return Ok(());
        }
        #[cfg(not(feature = "json"))]
        log::warn!("built without the 'json' feature; printing plain statistics");
    }

    println!("Run statistics:");
    println!("  Needles: {}", stats.needles);
    println!("  Matched: {}", stats.matched);
    println!("  Unmatched: {}", stats.unmatched);
    println!("  Candidate rows: {}", stats.candidates);
    println!("  Haystack rows: {}", stats.haystack);
    Ok(())
}
