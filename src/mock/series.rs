//! Bounded random-walk time series generation.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::Rng;

use super::models::{HealthMetrics, MetricSample};

/// Generate `hours + 1` hourly samples ending at `now`, oldest first.
///
/// Each value is drawn uniformly from `baseline ± variance / 2` and floored
/// at zero. The caller supplies the RNG so scenario tests can seed it.
pub fn generate_series<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    hours: u32,
    baseline: f64,
    variance: f64,
) -> Vec<MetricSample> {
    let mut data = Vec::with_capacity(hours as usize + 1);

    for i in (0..=hours).rev() {
        let timestamp = now - ChronoDuration::hours(i as i64);
        let value = baseline + (rng.gen::<f64>() - 0.5) * variance;
        data.push(MetricSample {
            timestamp,
            value: value.max(0.0),
        });
    }

    data
}

/// Generate the 24-hour health metric series for `/api/health/metrics`.
pub fn health_metrics<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> HealthMetrics {
    HealthMetrics {
        response_time: generate_series(rng, now, 24, 250.0, 100.0),
        error_rate: generate_series(rng, now, 24, 0.5, 1.0),
        uptime: generate_series(rng, now, 24, 99.8, 0.4),
        memory_usage: generate_series(rng, now, 24, 65.0, 20.0),
        cpu_usage: generate_series(rng, now, 24, 45.0, 30.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_series_length_spacing_and_floor() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();
        let series = generate_series(&mut rng, now, 24, 0.5, 1.0);

        assert_eq!(series.len(), 25);
        assert_eq!(series.last().unwrap().timestamp, now);

        for pair in series.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, ChronoDuration::hours(1));
        }
        for sample in &series {
            assert!(sample.value >= 0.0);
        }
    }

    #[test]
    fn test_zero_hours_yields_single_sample_at_now() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();
        let series = generate_series(&mut rng, now, 0, 100.0, 10.0);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].timestamp, now);
    }

    #[test]
    fn test_zero_variance_is_constant_at_baseline() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();
        let series = generate_series(&mut rng, now, 2, 100.0, 0.0);

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].timestamp, now - ChronoDuration::hours(2));
        assert_eq!(series[1].timestamp, now - ChronoDuration::hours(1));
        assert_eq!(series[2].timestamp, now);
        for sample in &series {
            assert_eq!(sample.value, 100.0);
        }
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let now = Utc::now();
        let a = generate_series(&mut StdRng::seed_from_u64(99), now, 24, 250.0, 100.0);
        let b = generate_series(&mut StdRng::seed_from_u64(99), now, 24, 250.0, 100.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_values_stay_within_variance_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let now = Utc::now();
        let series = generate_series(&mut rng, now, 100, 50.0, 10.0);

        for sample in &series {
            assert!(sample.value >= 45.0 && sample.value <= 55.0);
        }
    }

    #[test]
    fn test_health_metrics_all_series_full_day() {
        let mut rng = StdRng::seed_from_u64(1);
        let metrics = health_metrics(&mut rng, Utc::now());

        for series in [
            &metrics.response_time,
            &metrics.error_rate,
            &metrics.uptime,
            &metrics.memory_usage,
            &metrics.cpu_usage,
        ] {
            assert_eq!(series.len(), 25);
            assert!(series.iter().all(|s| s.value >= 0.0));
        }
    }
}
