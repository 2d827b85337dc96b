//! CacheStats unit tests.
//!
//! Verifies default initialization, counter routing, derived metric
//! computation, and the rendered results lines.

use cachesim_core::common::AccessType;
use cachesim_core::stats::CacheStats;
use pretty_assertions::assert_eq;

#[test]
fn default_stats_all_zero() {
    let stats = CacheStats::default();
    assert_eq!(stats.read_hits, 0);
    assert_eq!(stats.read_misses, 0);
    assert_eq!(stats.write_hits, 0);
    assert_eq!(stats.write_misses, 0);
    assert_eq!(stats.accesses(), 0);
}

#[test]
fn record_routes_to_one_counter() {
    let mut stats = CacheStats::default();
    stats.record(AccessType::Read, true);
    stats.record(AccessType::Read, false);
    stats.record(AccessType::Read, false);
    stats.record(AccessType::Write, true);
    stats.record(AccessType::Write, true);
    stats.record(AccessType::Write, true);
    stats.record(AccessType::Write, false);

    assert_eq!(
        stats,
        CacheStats {
            read_hits: 1,
            read_misses: 2,
            write_hits: 3,
            write_misses: 1,
        }
    );
    assert_eq!(stats.reads(), 3);
    assert_eq!(stats.writes(), 4);
    assert_eq!(stats.accesses(), 7);
}

#[test]
fn miss_rates_with_no_accesses_are_zero() {
    let stats = CacheStats::default();
    assert_eq!(stats.read_miss_rate(), 0.0);
    assert_eq!(stats.write_miss_rate(), 0.0);
}

#[test]
fn miss_rates_are_percentages() {
    let stats = CacheStats {
        read_hits: 3,
        read_misses: 1,
        write_hits: 0,
        write_misses: 2,
    };
    assert!((stats.read_miss_rate() - 25.0).abs() < 1e-9);
    assert!((stats.write_miss_rate() - 100.0).abs() < 1e-9);
}

#[test]
fn report_lists_every_counter() {
    let stats = CacheStats {
        read_hits: 3,
        read_misses: 1,
        write_hits: 5,
        write_misses: 0,
    };
    let report = stats.report();
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Read hits:         3",
            "Read misses:       1",
            "Read miss rate:    25.00%",
            "Write hits:        5",
            "Write misses:      0",
            "Write miss rate:   0.00%",
        ]
    );
}
