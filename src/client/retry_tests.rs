//! Tests for `RetryPolicy`.

use super::RetryPolicy;
use std::time::Duration;

mod retry_policy_defaults {
    use super::*;

    #[test]
    fn new_creates_policy_with_defaults() {
        let policy = RetryPolicy::new();

        assert_eq!(policy.timeout, RetryPolicy::DEFAULT_TIMEOUT);
        assert_eq!(policy.initial_delay, RetryPolicy::DEFAULT_INITIAL_DELAY);
        assert_eq!(policy.max_delay, RetryPolicy::DEFAULT_MAX_DELAY);
        assert!((policy.multiplier - RetryPolicy::DEFAULT_MULTIPLIER).abs() < f64::EPSILON);
        assert!(!policy.retry_transport_errors);
    }

    #[test]
    fn default_trait_matches_new() {
        assert_eq!(RetryPolicy::new(), RetryPolicy::default());
    }

    #[test]
    fn default_timeout_is_one_minute() {
        assert_eq!(RetryPolicy::DEFAULT_TIMEOUT, Duration::from_secs(60));
    }

    #[test]
    fn no_retry_has_zero_budget() {
        let policy = RetryPolicy::no_retry();

        assert_eq!(policy.timeout, Duration::ZERO);
        assert!(!policy.fits_budget(Duration::ZERO, policy.delay_for_retry(0)));
    }
}

mod retry_policy_builder {
    use super::*;

    #[test]
    fn builders_set_values() {
        let policy = RetryPolicy::new()
            .with_timeout(Duration::from_secs(5))
            .with_initial_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_secs(1))
            .with_multiplier(3.0)
            .with_retry_transport_errors(true);

        assert_eq!(policy.timeout, Duration::from_secs(5));
        assert_eq!(policy.initial_delay, Duration::from_millis(100));
        assert_eq!(policy.max_delay, Duration::from_secs(1));
        assert!((policy.multiplier - 3.0).abs() < f64::EPSILON);
        assert!(policy.retry_transport_errors);
    }

    #[test]
    #[should_panic(expected = "multiplier must be positive")]
    fn with_multiplier_zero_panics() {
        let _ = RetryPolicy::new().with_multiplier(0.0);
    }

    #[test]
    #[should_panic(expected = "multiplier must be positive")]
    fn with_multiplier_negative_panics() {
        let _ = RetryPolicy::new().with_multiplier(-1.0);
    }
}

mod delay_calculation {
    use super::*;

    #[test]
    fn delays_grow_exponentially() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_secs(1))
            .with_multiplier(2.0);

        assert_eq!(policy.delay_for_retry(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for_retry(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(4));
    }

    #[test]
    fn delay_is_capped_at_max_delay() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(5));

        assert_eq!(policy.delay_for_retry(10), Duration::from_secs(5));
    }

    #[test]
    fn delay_survives_huge_retry_counts() {
        let policy = RetryPolicy::new();

        assert_eq!(policy.delay_for_retry(u32::MAX), policy.max_delay);
    }
}

mod budget {
    use super::*;

    #[test]
    fn delay_inside_budget_fits() {
        let policy = RetryPolicy::new().with_timeout(Duration::from_secs(10));

        assert!(policy.fits_budget(Duration::from_secs(4), Duration::from_secs(6)));
    }

    #[test]
    fn delay_past_budget_does_not_fit() {
        let policy = RetryPolicy::new().with_timeout(Duration::from_secs(10));

        assert!(!policy.fits_budget(Duration::from_secs(8), Duration::from_secs(3)));
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let policy = RetryPolicy::new();

        assert!(!policy.fits_budget(Duration::MAX, Duration::from_secs(1)));
    }
}
