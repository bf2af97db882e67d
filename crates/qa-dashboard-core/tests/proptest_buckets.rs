// crates/qa-dashboard-core/tests/proptest_buckets.rs
// ============================================================================
// Module: Performance Bucket Property-Based Tests
// Description: Threshold and search properties over arbitrary inputs.
// Purpose: Ensure every score lands in exactly one concrete bucket.
// ============================================================================

//! Performance bucket property-based tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use qa_dashboard_core::PerformanceBucket;
use qa_dashboard_core::matches_search;

proptest! {
    #[test]
    fn each_score_lands_in_one_bucket(score in 0.0f64..10.0) {
        let hits = [PerformanceBucket::High, PerformanceBucket::Medium, PerformanceBucket::Low]
            .into_iter()
            .filter(|bucket| bucket.contains(score))
            .count();
        prop_assert_eq!(hits, 1);
        prop_assert!(PerformanceBucket::All.contains(score));
    }

    #[test]
    fn high_bucket_respects_threshold(score in 0.0f64..10.0) {
        prop_assert_eq!(PerformanceBucket::High.contains(score), score >= 8.5);
        prop_assert_eq!(PerformanceBucket::Low.contains(score), score < 7.0);
    }

    #[test]
    fn search_ignores_case(name in "[A-Za-z ]{1,24}") {
        prop_assert!(matches_search(&name, &name.to_uppercase()));
        prop_assert!(matches_search(&name, &name.to_lowercase()));
    }

    #[test]
    fn search_matches_only_substrings_as_typed(name in "[a-z]{1,12}", pad in " {1,3}") {
        prop_assert!(matches_search(&name, ""));
        let padded_after = format!("{name}{pad}");
        prop_assert!(!matches_search(&name, &padded_after));
        let padded_before = format!("{pad}{name}");
        prop_assert!(!matches_search(&name, &padded_before));
    }
}
