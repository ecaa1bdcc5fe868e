//! Basic usage example for geolink-rs
//!
//! This example demonstrates how to:
//! - Build comparison keys
//! - Link needles against an in-memory haystack in both modes
//! - Read the matched and unmatched sets back

use geolink_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== geolink Basic Usage Example ===\n");

    let haystack_rows = vec![
        LocalityRecord::new("9", "usa", "ca", "losangeles"),
        LocalityRecord::new("10", "France", "IledeFrance", "Parris"),
        LocalityRecord::new("11", "Spain", "Madrid", "Madrid"),
    ];
    let needles = vec![
        LocalityRecord::new("1", "USA", "CA", "LosAngeles"),
        LocalityRecord::new("2", "France", "Ile-de-France", "Paris"),
        LocalityRecord::new("3", "Japan", "Tokyo", "Shinjuku"),
    ];

    // Example 1: Comparison keys
    println!("--- Example 1: Comparison keys ---");
    for n in &needles {
        let key = build_key(n, FoldMode::Lowercase);
        println!("{} -> {:?} (folded {:?})", n.id, key.raw(), key.folded());
    }
    println!();

    // Example 2: Both modes against the same haystack
    for mode in [MatchMode::Extended, MatchMode::Simple] {
        println!("--- Example 2: {mode:?} mode ---");
        let config = LinkConfig {
            mode,
            ..LinkConfig::default()
        };
        let haystack = Haystack::from_records(haystack_rows.clone(), config.fold);
        let linker = Linker::new(&config, &haystack)?;

        let mut sink = MemorySink::new();
        let stats = linker.run_records(needles.clone(), &mut sink)?;

        for c in sink.candidates() {
            println!(
                "  match   {} -> {} (distance {}): {:?} ~ {:?}",
                c.needle_id, c.haystack_id, c.distance, c.needle_key, c.haystack_key
            );
        }
        for r in &sink.unmatched {
            println!(
                "  nomatch {} ({} {} {}) min={:?} max={:?}",
                r.needle_id, r.country, r.province, r.city, r.min_distance, r.max_distance
            );
        }
        println!(
            "  {} needles: {} matched, {} unmatched\n",
            stats.needles, stats.matched, stats.unmatched
        );
    }

    Ok(())
}
