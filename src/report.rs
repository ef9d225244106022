//! Group Report - summary statistics for a formed group
//!
//! Computed once at report time; wait times are measured against the
//! report's own clock reading, not the formation instant.

use chrono::{DateTime, Utc};

use crate::core_types::Player;

/// min / max / average over one attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl Stats {
    /// Returns `None` for an empty input
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut sum = 0.0;
        let mut n = 0usize;

        for v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            n += 1;
        }

        (n > 0).then(|| Stats {
            min,
            max,
            avg: sum / n as f64,
        })
    }
}

/// Statistics for one formed group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupReport {
    pub players: Vec<String>,
    pub skill: Stats,
    pub latency: Stats,
    /// Seconds spent queued
    pub wait_secs: Stats,
}

impl GroupReport {
    /// Build a report for `group` as of `now`. `None` for an empty group.
    pub fn build(group: &[Player], now: DateTime<Utc>) -> Option<Self> {
        Some(Self {
            players: group.iter().map(|p| p.name.clone()).collect(),
            skill: Stats::from_values(group.iter().map(|p| p.skill))?,
            latency: Stats::from_values(group.iter().map(|p| p.latency))?,
            wait_secs: Stats::from_values(group.iter().map(|p| p.wait_secs(now)))?,
        })
    }

    /// Emit to the log sink. Never fails.
    pub fn emit(&self) {
        tracing::info!(
            players = ?self.players,
            skill_min = self.skill.min,
            skill_max = self.skill.max,
            skill_avg = self.skill.avg,
            latency_min = self.latency.min,
            latency_max = self.latency.max,
            latency_avg = self.latency.avg,
            wait_min = self.wait_secs.min,
            wait_max = self.wait_secs.max,
            wait_avg = self.wait_secs.avg,
            "Group formed: skill {:.2}/{:.2}/{:.2}, latency {:.2}/{:.2}/{:.2}, wait {:.2}s/{:.2}s/{:.2}s (min/max/avg)",
            self.skill.min,
            self.skill.max,
            self.skill.avg,
            self.latency.min,
            self.latency.max,
            self.latency.avg,
            self.wait_secs.min,
            self.wait_secs.max,
            self.wait_secs.avg,
        );
    }
}

/// Build and emit the report for a freshly formed group
pub fn report_group(group: &[Player]) -> Option<GroupReport> {
    let report = GroupReport::build(group, Utc::now())?;
    report.emit();
    Some(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn player(name: &str, skill: f64, latency: f64, queued: DateTime<Utc>) -> Player {
        Player {
            name: name.to_string(),
            skill,
            latency,
            enqueued_at: queued,
        }
    }

    #[test]
    fn test_stats_basic() {
        let s = Stats::from_values([3.0, 1.0, 2.0]).unwrap();
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 3.0);
        assert_eq!(s.avg, 2.0);
    }

    #[test]
    fn test_stats_negative_values() {
        // No bounds are enforced on skill/latency
        let s = Stats::from_values([-5.0, -1.0]).unwrap();
        assert_eq!(s.min, -5.0);
        assert_eq!(s.max, -1.0);
        assert_eq!(s.avg, -3.0);
    }

    #[test]
    fn test_stats_empty() {
        assert!(Stats::from_values(std::iter::empty()).is_none());
    }

    #[test]
    fn test_group_report() {
        let now = Utc::now();
        let group = vec![
            player("a", 1000.0, 20.0, now - Duration::seconds(10)),
            player("b", 1200.0, 60.0, now - Duration::seconds(4)),
            player("c", 1400.0, 40.0, now - Duration::seconds(1)),
        ];

        let report = GroupReport::build(&group, now).unwrap();
        assert_eq!(report.players, vec!["a", "b", "c"]);
        assert_eq!(report.skill.min, 1000.0);
        assert_eq!(report.skill.max, 1400.0);
        assert_eq!(report.skill.avg, 1200.0);
        assert_eq!(report.latency.min, 20.0);
        assert_eq!(report.latency.max, 60.0);
        assert_eq!(report.latency.avg, 40.0);
        assert!((report.wait_secs.min - 1.0).abs() < 1e-9);
        assert!((report.wait_secs.max - 10.0).abs() < 1e-9);
        assert!((report.wait_secs.avg - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_group_has_no_report() {
        assert!(GroupReport::build(&[], Utc::now()).is_none());
        assert!(report_group(&[]).is_none());
    }
}
