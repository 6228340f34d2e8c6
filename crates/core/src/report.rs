//! Daily summary projection over recorded activity rows.
//!
//! The denormalized daily report is a cache of this computation, never
//! primary data: it can be rebuilt from activity rows at any time and two
//! runs over the same rows produce identical results.

use serde::Serialize;

/// Number of domains retained in the per-day usage map.
pub const TOP_DOMAIN_LIMIT: usize = 10;

/// One recorded activity interval, as needed by the projection.
#[derive(Debug, Clone)]
pub struct ActivitySample {
    pub domain_name: String,
    pub active_seconds: i64,
    pub idle_seconds: i64,
    pub is_allowed: bool,
}

/// Computed daily totals.
///
/// `total_work_time` is derived as `productive_time + idle_time +
/// blocked_active_time` by construction, so the balance invariant cannot
/// drift between independently maintained fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub total_work_time: i64,
    pub productive_time: i64,
    pub idle_time: i64,
    pub blocked_active_time: i64,
    pub violation_count: i64,
    /// Top domains by combined active+idle seconds, highest first.
    /// Ties keep first-encountered order.
    pub top_domains: Vec<(String, i64)>,
}

impl DailySummary {
    /// Productivity as a percentage of total work time (0 when empty).
    pub fn productivity_percentage(&self) -> f64 {
        if self.total_work_time == 0 {
            return 0.0;
        }
        (self.productive_time as f64 / self.total_work_time as f64) * 100.0
    }

    /// The top-domain map as a JSON object (domain -> seconds).
    pub fn top_domains_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .top_domains
            .iter()
            .map(|(domain, seconds)| (domain.clone(), serde_json::Value::from(*seconds)))
            .collect();
        serde_json::Value::Object(map)
    }
}

/// Fold activity samples into a [`DailySummary`].
///
/// - productive time: active seconds on allowed domains
/// - blocked active time: active seconds on disallowed domains
/// - idle time: idle seconds regardless of domain
/// - violation count: number of disallowed rows
pub fn summarize(samples: &[ActivitySample]) -> DailySummary {
    let mut productive_time = 0;
    let mut idle_time = 0;
    let mut blocked_active_time = 0;
    let mut violation_count = 0;

    // Per-domain totals in first-encountered order, so that the stable
    // sort below breaks ties deterministically.
    let mut domain_totals: Vec<(String, i64)> = Vec::new();

    for sample in samples {
        if sample.is_allowed {
            productive_time += sample.active_seconds;
        } else {
            blocked_active_time += sample.active_seconds;
            violation_count += 1;
        }
        idle_time += sample.idle_seconds;

        let combined = sample.active_seconds + sample.idle_seconds;
        match domain_totals
            .iter_mut()
            .find(|(domain, _)| *domain == sample.domain_name)
        {
            Some((_, seconds)) => *seconds += combined,
            None => domain_totals.push((sample.domain_name.clone(), combined)),
        }
    }

    domain_totals.sort_by(|a, b| b.1.cmp(&a.1));
    domain_totals.truncate(TOP_DOMAIN_LIMIT);

    DailySummary {
        total_work_time: productive_time + idle_time + blocked_active_time,
        productive_time,
        idle_time,
        blocked_active_time,
        violation_count,
        top_domains: domain_totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(domain: &str, active: i64, idle: i64, allowed: bool) -> ActivitySample {
        ActivitySample {
            domain_name: domain.to_string(),
            active_seconds: active,
            idle_seconds: idle,
            is_allowed: allowed,
        }
    }

    #[test]
    fn empty_input_yields_zeroed_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_work_time, 0);
        assert_eq!(summary.violation_count, 0);
        assert!(summary.top_domains.is_empty());
        assert_eq!(summary.productivity_percentage(), 0.0);
    }

    #[test]
    fn totals_balance_for_mixed_rows() {
        let summary = summarize(&[
            sample("github.com", 600, 60, true),
            sample("youtube.com", 300, 30, false),
            sample("docs.rs", 0, 120, true),
        ]);
        assert_eq!(summary.productive_time, 600);
        assert_eq!(summary.blocked_active_time, 300);
        assert_eq!(summary.idle_time, 210);
        assert_eq!(
            summary.total_work_time,
            summary.productive_time + summary.idle_time + summary.blocked_active_time
        );
        assert_eq!(summary.violation_count, 1);
    }

    #[test]
    fn repeated_domains_accumulate() {
        let summary = summarize(&[
            sample("github.com", 100, 0, true),
            sample("github.com", 50, 25, true),
        ]);
        assert_eq!(summary.top_domains, vec![("github.com".to_string(), 175)]);
    }

    #[test]
    fn top_domains_capped_at_ten() {
        let samples: Vec<_> = (0..15)
            .map(|i| sample(&format!("site{i}.com"), 100 + i, 0, true))
            .collect();
        let summary = summarize(&samples);
        assert_eq!(summary.top_domains.len(), TOP_DOMAIN_LIMIT);
        // Highest combined seconds first.
        assert_eq!(summary.top_domains[0].0, "site14.com");
    }

    #[test]
    fn ties_keep_first_encountered_order() {
        let summary = summarize(&[
            sample("alpha.com", 100, 0, true),
            sample("beta.com", 100, 0, true),
            sample("gamma.com", 200, 0, true),
        ]);
        let order: Vec<&str> = summary.top_domains.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(order, vec!["gamma.com", "alpha.com", "beta.com"]);
    }

    #[test]
    fn summarize_is_idempotent_over_same_rows() {
        let rows = vec![
            sample("github.com", 600, 60, true),
            sample("youtube.com", 300, 0, false),
        ];
        assert_eq!(summarize(&rows), summarize(&rows));
    }

    #[test]
    fn idle_counts_regardless_of_allowed_flag() {
        let summary = summarize(&[sample("youtube.com", 0, 500, false)]);
        assert_eq!(summary.idle_time, 500);
        assert_eq!(summary.blocked_active_time, 0);
        assert_eq!(summary.violation_count, 1);
        assert_eq!(summary.total_work_time, 500);
    }

    #[test]
    fn top_domains_json_maps_domain_to_seconds() {
        let summary = summarize(&[sample("github.com", 90, 10, true)]);
        let json = summary.top_domains_json();
        assert_eq!(json["github.com"], 100);
    }
}
