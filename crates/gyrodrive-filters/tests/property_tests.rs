//! Property-Based Tests for Filters
//!
//! This module contains property tests that verify smoothing behavior
//! across a wide range of inputs.

use gyrodrive_filters::prelude::*;

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn reference_output(history: &[f64], capacity: usize, limit: f64) -> f64 {
        let start = history.len().saturating_sub(capacity);
        let recent = history.get(start..).unwrap_or_default();
        if recent.is_empty() {
            return 0.0;
        }
        let mean = recent.iter().sum::<f64>() / recent.len() as f64;
        mean.clamp(-limit, limit)
    }

    proptest! {
        #[test]
        fn window_length_never_exceeds_capacity(
            capacity in 1usize..=32,
            inputs in prop::collection::vec(-100.0f64..100.0, 0..200),
        ) {
            let mut state = SmoothingWindow::new(capacity, 10.0);
            for v in inputs {
                smoothing_filter(v, &mut state);
                prop_assert!(state.len() <= capacity);
            }
        }

        #[test]
        fn output_always_within_limit(
            inputs in prop::collection::vec(
                any::<f64>().prop_filter("finite", |v| v.is_finite()),
                1..100,
            ),
        ) {
            let mut state = SmoothingWindow::default();
            for v in inputs {
                let out = smoothing_filter(v, &mut state);
                prop_assert!((-10.0..=10.0).contains(&out));
            }
        }

        #[test]
        fn output_is_clamped_mean_of_recent_samples(
            capacity in 1usize..=16,
            inputs in prop::collection::vec(-20.0f64..20.0, 1..80),
        ) {
            let mut state = SmoothingWindow::new(capacity, 10.0);
            let mut history = Vec::new();
            for v in inputs {
                history.push(v);
                let out = smoothing_filter(v, &mut state);
                let expected = reference_output(&history, capacity, 10.0);
                prop_assert!((out - expected).abs() < 1e-9, "got {out}, expected {expected}");
            }
        }

        #[test]
        fn output_is_deterministic(
            inputs in prop::collection::vec(-20.0f64..20.0, 1..50),
        ) {
            let mut a = SmoothingWindow::default();
            let mut b = SmoothingWindow::default();
            for v in inputs {
                let out_a = smoothing_filter(v, &mut a);
                let out_b = smoothing_filter(v, &mut b);
                prop_assert!((out_a - out_b).abs() < f64::EPSILON);
            }
        }

        #[test]
        fn reset_restores_empty_state(
            inputs in prop::collection::vec(-20.0f64..20.0, 1..50),
        ) {
            let mut state = SmoothingWindow::new(7, 5.0);
            for v in inputs {
                smoothing_filter(v, &mut state);
            }
            state.reset();
            prop_assert!(state.is_empty());
            prop_assert_eq!(state.capacity(), 7);
            prop_assert!(state.output().abs() < f64::EPSILON);
        }
    }
}
