// crates/geolink-core/tests/scenarios.rs
use geolink_core::prelude::*;

fn rec(id: &str, country: &str, province: &str, city: &str) -> LocalityRecord {
    LocalityRecord::new(id, country, province, city)
}

fn run(
    config: &LinkConfig,
    needles: Vec<LocalityRecord>,
    hay: Vec<LocalityRecord>,
) -> (RunStats, MemorySink) {
    let haystack = Haystack::from_records(hay, config.fold);
    let linker = Linker::new(config, &haystack).unwrap();
    let mut sink = MemorySink::new();
    let stats = linker.run_records(needles, &mut sink).unwrap();
    (stats, sink)
}

fn extended() -> LinkConfig {
    LinkConfig::default()
}

fn simple() -> LinkConfig {
    LinkConfig {
        mode: MatchMode::Simple,
        ..LinkConfig::default()
    }
}

fn paris_haystack() -> Vec<LocalityRecord> {
    vec![
        rec("h1", "Germany", "Bavaria", "Munich"),
        rec("h2", "France", "IledeFrance", "Parris"),
        rec("h3", "Spain", "Madrid", "Madrid"),
    ]
}

#[test]
fn scenario_a_case_insensitive_exact_match() {
    let (stats, sink) = run(
        &extended(),
        vec![rec("1", "USA", "CA", "LosAngeles")],
        vec![rec("9", "usa", "ca", "losangeles")],
    );
    assert_eq!(stats.matched, 1);
    assert_eq!(sink.matched.len(), 1);
    assert_eq!(
        sink.matched[0],
        vec![CandidateMatch {
            distance: 0,
            needle_id: "1".into(),
            needle_key: "USA CA LosAngeles".into(),
            haystack_id: "9".into(),
            haystack_key: "usa ca losangeles".into(),
        }]
    );
}

#[test]
fn scenario_b_near_match_within_threshold() {
    let (_, sink) = run(
        &extended(),
        vec![rec("n", "France", "Ile-de-France", "Paris")],
        paris_haystack(),
    );
    assert!(sink.unmatched.is_empty());
    let candidates = &sink.matched[0];
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].distance, 3);
    assert_eq!(candidates[0].haystack_key, "France IledeFrance Parris");
}

#[test]
fn scenario_c_unmatched_reports_smallest_observed_distance() {
    let hay = vec![
        rec("far", "zzz", "zzz", "zzz"),
        rec("nearest", "abc", "def", "ghixxxxx"),
        rec("mid", "abc", "def", "ghixxxxxxx"),
    ];
    let (stats, sink) = run(&extended(), vec![rec("n", "abc", "def", "ghi")], hay);
    assert_eq!(stats.unmatched, 1);
    let miss = &sink.unmatched[0];
    assert_eq!(miss.needle_id, "n");
    assert_eq!(
        (miss.country.as_str(), miss.province.as_str(), miss.city.as_str()),
        ("abc", "def", "ghi")
    );
    assert_eq!(miss.min_distance, Some(5));
    assert_eq!(miss.max_distance, Some(9));
}

#[test]
fn scenario_d_simple_mode_never_measures_distance() {
    let (stats, sink) = run(
        &simple(),
        vec![rec("n", "France", "Ile-de-France", "Paris")],
        paris_haystack(),
    );
    assert_eq!(stats.unmatched, 1);
    assert!(sink.matched.is_empty());
    assert_eq!(sink.unmatched[0].min_distance, None);
    assert_eq!(sink.unmatched[0].max_distance, None);
}

#[test]
fn scenario_e_empty_haystack_is_unmatched_without_error() {
    for config in [extended(), simple()] {
        let (stats, sink) = run(&config, vec![rec("n", "USA", "CA", "LA")], Vec::new());
        assert_eq!(stats.unmatched, 1);
        assert_eq!(stats.haystack, 0);
        assert_eq!(sink.unmatched[0].min_distance, None);
        assert_eq!(sink.unmatched[0].max_distance, None);
    }
}

#[test]
fn threshold_boundary_is_inclusive() {
    let hay = vec![
        rec("at", "abc", "def", "ghixxxx"),
        rec("over", "abc", "def", "ghixxxxx"),
    ];
    let (_, sink) = run(&extended(), vec![rec("n", "abc", "def", "ghi")], hay);
    let got: Vec<_> = sink
        .candidates()
        .map(|c| (c.haystack_id.as_str(), c.distance))
        .collect();
    assert_eq!(got, vec![("at", 4)]);
}

#[test]
fn configured_threshold_moves_the_boundary() {
    let config = LinkConfig {
        threshold: 5,
        ..extended()
    };
    let hay = vec![rec("over", "abc", "def", "ghixxxxx")];
    let (stats, _) = run(&config, vec![rec("n", "abc", "def", "ghi")], hay);
    assert_eq!(stats.matched, 1);
}

#[test]
fn exact_match_excludes_later_near_matches() {
    let hay = vec![
        rec("before", "abc", "def", "ghj"),
        rec("exact", "ABC", "Def", "GHI"),
        rec("after", "abc", "def", "gh"),
    ];
    let (_, sink) = run(&extended(), vec![rec("n", "abc", "def", "ghi")], hay);
    let ids: Vec<_> = sink.candidates().map(|c| c.haystack_id.as_str()).collect();
    assert_eq!(ids, vec!["before", "exact"]);
    assert!(sink.candidates().any(|c| c.distance == 0));
}

#[test]
fn every_needle_lands_in_exactly_one_set() {
    let needles = vec![
        rec("1", "USA", "CA", "LosAngeles"),
        rec("2", "France", "Ile-de-France", "Paris"),
        rec("3", "Nowhere", "Nothing", "Nobody"),
        rec("4", "Spain", "Madrid", "Madrid"),
        rec("5", "", "", ""),
    ];
    let mut hay = paris_haystack();
    hay.push(rec("h4", "usa", "ca", "losangeles"));

    for config in [extended(), simple()] {
        let (stats, sink) = run(&config, needles.clone(), hay.clone());
        let matched: Vec<_> = sink.matched.iter().map(|c| c[0].needle_id.clone()).collect();
        let unmatched: Vec<_> = sink.unmatched.iter().map(|r| r.needle_id.clone()).collect();

        assert_eq!(stats.needles, needles.len());
        assert_eq!(matched.len() + unmatched.len(), needles.len());
        for n in &needles {
            let in_matched = matched.contains(&n.id);
            let in_unmatched = unmatched.contains(&n.id);
            assert!(in_matched ^ in_unmatched, "needle {} in both or neither", n.id);
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let needles = vec![
        rec("1", "France", "Ile-de-France", "Paris"),
        rec("2", "Spain", "Madrid", "Madrit"),
        rec("3", "Peru", "Lima", "Lima"),
    ];
    let (_, first) = run(&extended(), needles.clone(), paris_haystack());
    let (_, second) = run(&extended(), needles, paris_haystack());
    assert_eq!(first.matched, second.matched);
    assert_eq!(first.unmatched, second.unmatched);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_run_matches_sequential_run() {
    let needles: Vec<_> = (0..200)
        .map(|i| {
            let city = match i % 4 {
                0 => "Paris",
                1 => "Parris",
                2 => "Madrid",
                _ => "Nowhere",
            };
            rec(&i.to_string(), "France", "Ile-de-France", city)
        })
        .collect();
    let mut hay = paris_haystack();
    hay.push(rec("h5", "France", "Ile-de-France", "Paris"));
    hay.push(rec("h6", "France", "Ile-de-France", "Pariss"));

    let (seq_stats, seq) = run(&extended(), needles.clone(), hay.clone());
    let parallel = LinkConfig {
        parallel: true,
        threads: Some(4),
        batch_size: 7,
        ..extended()
    };
    let (par_stats, par) = run(&parallel, needles, hay);

    assert_eq!(seq_stats, par_stats);
    assert_eq!(seq.matched, par.matched);
    assert_eq!(seq.unmatched, par.unmatched);
}

#[test]
fn transliterate_fold_matches_across_accents() {
    let needles = vec![rec("n", "Schweiz", "Zürich", "Zürich")];
    let hay = vec![rec("h", "schweiz", "zurich", "zurich")];

    let (_, lower) = run(&extended(), needles.clone(), hay.clone());
    assert_eq!(lower.matched[0][0].distance, 2);

    let config = LinkConfig {
        fold: FoldMode::Transliterate,
        ..extended()
    };
    let (_, folded) = run(&config, needles, hay);
    assert_eq!(folded.matched[0][0].distance, 0);
}

#[test]
fn linker_rejects_mismatched_fold() {
    let haystack = Haystack::from_records(paris_haystack(), FoldMode::Transliterate);
    let err = Linker::new(&LinkConfig::default(), &haystack).unwrap_err();
    assert!(matches!(err, LinkError::InvalidConfig(_)));
}

#[test]
fn malformed_needle_aborts_after_earlier_output() {
    let haystack = Haystack::from_records(paris_haystack(), FoldMode::Lowercase);
    let linker = Linker::new(&LinkConfig::default(), &haystack).unwrap();
    let needles = vec![
        Ok(rec("1", "Spain", "Madrid", "Madrid")),
        LocalityRecord::from_fields(["2", "Spain"], RecordSet::Needles, 2),
        Ok(rec("3", "Spain", "Madrid", "Madrid")),
    ];
    let mut sink = MemorySink::new();
    let err = linker.run(needles, &mut sink).unwrap_err();

    assert!(matches!(
        err,
        LinkError::MalformedRecord { set: RecordSet::Needles, row: 2, found: 2 }
    ));
    assert_eq!(sink.matched.len(), 1);
    assert_eq!(sink.matched[0][0].needle_id, "1");
}

#[test]
fn each_run_starts_from_an_empty_sink() {
    let haystack = Haystack::from_records(paris_haystack(), FoldMode::Lowercase);
    let linker = Linker::new(&LinkConfig::default(), &haystack).unwrap();
    let mut sink = MemorySink::new();
    linker.run_records([rec("1", "Spain", "Madrid", "Madrid")], &mut sink).unwrap();
    linker.run_records([rec("2", "Spain", "Madrid", "Madrid")], &mut sink).unwrap();

    assert_eq!(sink.runs_started, 2);
    assert_eq!(sink.matched.len(), 1);
    assert_eq!(sink.matched[0][0].needle_id, "2");
}
