//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use chrono::NaiveDate;
use domain::{DateBound, ReferenceWindow, TemperatureStats};
use proptest::prelude::*;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN))
}

// ============================================================================
// ReferenceWindow Property Tests
// ============================================================================

mod reference_window_tests {
    use super::*;

    proptest! {
        #[test]
        fn window_spans_exactly_requested_days(
            anchor in arb_date(),
            days in 0u32..5000
        ) {
            let window = ReferenceWindow::new(anchor, days).unwrap();
            let span = (window.last_recorded() - window.start()).num_days();
            prop_assert_eq!(span, i64::from(days));
        }

        #[test]
        fn start_text_orders_like_the_date(
            anchor in arb_date(),
            days in 0u32..5000
        ) {
            let window = ReferenceWindow::new(anchor, days).unwrap();
            prop_assert!(window.start_str() <= window.end_str());
        }

        #[test]
        fn parse_round_trips_storage_format(anchor in arb_date()) {
            let text = anchor.format("%Y-%m-%d").to_string();
            let window = ReferenceWindow::parse(&text, 365).unwrap();
            prop_assert_eq!(window.end_str(), text);
        }
    }
}

// ============================================================================
// DateBound Property Tests
// ============================================================================

mod date_bound_tests {
    use super::*;

    proptest! {
        #[test]
        fn text_order_matches_chronological_order(a in arb_date(), b in arb_date()) {
            let a_text = a.format("%Y-%m-%d").to_string();
            let b_text = b.format("%Y-%m-%d").to_string();
            let bound = DateBound::new(a_text);
            prop_assert_eq!(b_text.as_str().cmp(bound.as_str()), b.cmp(&a));
        }
    }
}

// ============================================================================
// TemperatureStats Property Tests
// ============================================================================

mod temperature_stats_tests {
    use super::*;

    proptest! {
        #[test]
        fn min_avg_max_are_ordered(
            values in prop::collection::vec(prop::option::of(-60.0f64..130.0), 1..200)
        ) {
            if let Some(stats) = TemperatureStats::from_values(values.clone()) {
                prop_assert!(stats.min <= stats.avg + 1e-9);
                prop_assert!(stats.avg <= stats.max + 1e-9);
            } else {
                prop_assert!(values.iter().all(Option::is_none));
            }
        }

        #[test]
        fn avg_is_arithmetic_mean(
            values in prop::collection::vec(-60.0f64..130.0, 1..200)
        ) {
            let stats = TemperatureStats::from_values(values.iter().copied().map(Some)).unwrap();
            #[allow(clippy::cast_precision_loss)]
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            prop_assert!((stats.avg - mean).abs() < 1e-9);
        }
    }
}
