// Dashboard statistics payload - Body of `POST /api/stats/dashboard`
use serde::{Deserialize, Deserializer};

/// Rule level at or above which an alert counts as critical.
pub const CRITICAL_LEVEL: u32 = 15;

/// Treats an explicit JSON `null` the same as a missing field.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HourlyAlertCount {
    #[serde(default, deserialize_with = "nullable")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "nullable")]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeverityLevelCount {
    #[serde(default, deserialize_with = "nullable")]
    pub level: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub count: u64,
}

/// Pre-aggregated severity counts. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeveritySummary {
    pub critical: Option<u64>,
    pub high: Option<u64>,
    pub medium: Option<u64>,
    pub low: Option<u64>,
}

impl SeveritySummary {
    pub fn new(critical: u64, high: u64, medium: u64, low: u64) -> Self {
        Self {
            critical: Some(critical),
            high: Some(high),
            medium: Some(medium),
            low: Some(low),
        }
    }

    /// `{}` is what the server sends when aggregation failed.
    pub fn is_empty(&self) -> bool {
        self.critical.is_none() && self.high.is_none() && self.medium.is_none() && self.low.is_none()
    }

    /// Folds a per-level breakdown into the four bands.
    pub fn from_breakdown(breakdown: &[SeverityLevelCount]) -> Self {
        let mut summary = Self::new(0, 0, 0, 0);
        for entry in breakdown {
            let slot = match SeverityBand::from_level(entry.level) {
                SeverityBand::Critical => &mut summary.critical,
                SeverityBand::High => &mut summary.high,
                SeverityBand::Medium => &mut summary.medium,
                SeverityBand::Low => &mut summary.low,
            };
            *slot = Some(slot.unwrap_or(0).saturating_add(entry.count));
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBand {
    Critical,
    High,
    Medium,
    Low,
}

impl SeverityBand {
    pub fn from_level(level: u32) -> Self {
        match level {
            l if l >= CRITICAL_LEVEL => SeverityBand::Critical,
            l if l >= 12 => SeverityBand::High,
            l if l >= 7 => SeverityBand::Medium,
            _ => SeverityBand::Low,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgentHealth {
    pub total: Option<u64>,
    pub online: Option<u64>,
    pub offline: Option<u64>,
}

impl AgentHealth {
    /// `total` if reported, else `online + offline` if either is reported.
    pub fn resolved_total(&self) -> Option<u64> {
        self.total.or(match (self.online, self.offline) {
            (None, None) => None,
            (online, offline) => Some(online.unwrap_or(0).saturating_add(offline.unwrap_or(0))),
        })
    }

    /// Whole percent of agents online. Zero when there are no agents.
    pub fn online_percent(&self, total: u64) -> u8 {
        if total == 0 {
            return 0;
        }
        let online = self.online.unwrap_or(0);
        let percent = (online as f64 / total as f64 * 100.0).round();
        percent.clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RuleCount {
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgentCount {
    #[serde(default, deserialize_with = "nullable")]
    pub agent_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SourceIpCount {
    #[serde(default, deserialize_with = "nullable")]
    pub ip: String,
    #[serde(default, deserialize_with = "nullable")]
    pub count: u64,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailyAlertCount {
    #[serde(default, deserialize_with = "nullable")]
    pub date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub count: u64,
}

/// Statistics for one client at one point in time. Every field tolerates being absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    #[serde(deserialize_with = "nullable")]
    pub alerts_per_hour: Vec<HourlyAlertCount>,
    pub severity_summary: Option<SeveritySummary>,
    #[serde(deserialize_with = "nullable")]
    pub severity_breakdown: Vec<SeverityLevelCount>,
    pub agent_health: Option<AgentHealth>,
    #[serde(deserialize_with = "nullable")]
    pub top_rules: Vec<RuleCount>,
    #[serde(deserialize_with = "nullable")]
    pub top_agents: Vec<AgentCount>,
    #[serde(deserialize_with = "nullable")]
    pub top_source_ips: Vec<SourceIpCount>,
    #[serde(deserialize_with = "nullable")]
    pub alert_trends: Vec<DailyAlertCount>,
    pub critical_alerts: Option<u64>,
    pub error: Option<String>,
    pub note: Option<String>,
}

impl DashboardStats {
    /// The summary, unless it is missing or an empty object.
    pub fn severity_summary(&self) -> Option<&SeveritySummary> {
        self.severity_summary.as_ref().filter(|s| !s.is_empty())
    }

    pub fn has_severity_data(&self) -> bool {
        !self.severity_breakdown.is_empty() || self.severity_summary().is_some()
    }

    pub fn alerts_total(&self) -> u64 {
        self.alerts_per_hour
            .iter()
            .fold(0u64, |total, b| total.saturating_add(b.count))
    }

    pub fn critical_count(&self) -> u64 {
        if let Some(summary) = self.severity_summary() {
            return summary.critical.unwrap_or(0);
        }
        if !self.severity_breakdown.is_empty() {
            return self
                .severity_breakdown
                .iter()
                .filter(|b| b.level >= CRITICAL_LEVEL)
                .fold(0u64, |total, b| total.saturating_add(b.count));
        }
        self.critical_alerts.unwrap_or(0)
    }

    pub fn agent_total(&self) -> Option<u64> {
        self.agent_health.as_ref().and_then(AgentHealth::resolved_total)
    }

    /// Non-empty error message, if the server reported one.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    pub fn note_message(&self) -> Option<&str> {
        self.note.as_deref().filter(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_error_fallback() {
        let json = r#"{
            "error": "connection refused",
            "alerts_per_hour": [],
            "severity_breakdown": [],
            "severity_summary": {},
            "top_rules": [],
            "agent_health": {"total": 0, "online": 0, "offline": 0}
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.error_message(), Some("connection refused"));
        assert!(stats.severity_summary().is_none());
        assert!(!stats.has_severity_data());
        assert_eq!(stats.agent_total(), Some(0));
    }

    #[test]
    fn test_parse_tolerates_nulls_and_missing_fields() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"top_rules": null, "alerts_per_hour": [{"timestamp": "2025-01-01 10:00:00"}]}"#)
                .unwrap();
        assert!(stats.top_rules.is_empty());
        assert_eq!(stats.alerts_per_hour[0].count, 0);
        assert_eq!(stats.agent_total(), None);
    }

    #[test]
    fn test_alerts_total() {
        let stats = DashboardStats::default();
        assert_eq!(stats.alerts_total(), 0);

        let stats = DashboardStats {
            alerts_per_hour: vec![
                HourlyAlertCount { timestamp: "a".into(), count: 4 },
                HourlyAlertCount { timestamp: "b".into(), count: 6 },
            ],
            ..Default::default()
        };
        assert_eq!(stats.alerts_total(), 10);
    }

    #[test]
    fn test_counts_saturate_instead_of_overflowing() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{
                "alerts_per_hour": [{"count": 18446744073709551615}, {"count": 1}],
                "severity_breakdown": [{"level": 15, "count": 18446744073709551615}, {"level": 16, "count": 2}],
                "agent_health": {"online": 18446744073709551615, "offline": 1}
            }"#,
        )
        .unwrap();

        assert_eq!(stats.alerts_total(), u64::MAX);
        assert_eq!(stats.critical_count(), u64::MAX);
        assert_eq!(stats.agent_total(), Some(u64::MAX));
        assert_eq!(
            SeveritySummary::from_breakdown(&stats.severity_breakdown).critical,
            Some(u64::MAX)
        );
    }

    #[test]
    fn test_null_entry_fields_fall_back_to_defaults() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{
                "alerts_per_hour": [{"timestamp": null, "count": null}, {"timestamp": "t", "count": 2}],
                "severity_breakdown": [{"level": null, "count": 4}],
                "top_rules": [{"description": null, "count": null}],
                "top_agents": [{"agent_name": "web-01", "count": null}],
                "top_source_ips": [{"ip": null, "count": 1, "country": null}],
                "alert_trends": [{"date": null, "count": 5}]
            }"#,
        )
        .unwrap();

        assert_eq!(stats.alerts_total(), 2);
        assert_eq!(stats.severity_breakdown[0].level, 0);
        assert_eq!(stats.top_rules[0], RuleCount::default());
        assert_eq!(stats.top_agents[0].count, 0);
        assert_eq!(stats.top_source_ips[0].country, None);
        assert_eq!(stats.alert_trends[0].count, 5);
    }

    #[test]
    fn test_critical_count_sources() {
        let breakdown = vec![
            SeverityLevelCount { level: 15, count: 2 },
            SeverityLevelCount { level: 16, count: 1 },
            SeverityLevelCount { level: 10, count: 9 },
        ];

        let stats = DashboardStats {
            severity_summary: Some(SeveritySummary::new(5, 0, 0, 0)),
            severity_breakdown: breakdown.clone(),
            ..Default::default()
        };
        assert_eq!(stats.critical_count(), 5);

        let stats = DashboardStats {
            severity_breakdown: breakdown,
            critical_alerts: Some(99),
            ..Default::default()
        };
        assert_eq!(stats.critical_count(), 3);

        let stats = DashboardStats {
            critical_alerts: Some(7),
            ..Default::default()
        };
        assert_eq!(stats.critical_count(), 7);
    }

    #[test]
    fn test_summary_from_breakdown() {
        let summary = SeveritySummary::from_breakdown(&[
            SeverityLevelCount { level: 15, count: 1 },
            SeverityLevelCount { level: 12, count: 2 },
            SeverityLevelCount { level: 7, count: 3 },
            SeverityLevelCount { level: 3, count: 4 },
            SeverityLevelCount { level: 5, count: 1 },
        ]);
        assert_eq!(summary, SeveritySummary::new(1, 2, 3, 5));
    }

    #[test]
    fn test_agent_health_percent() {
        let health = AgentHealth { total: Some(10), online: Some(7), offline: Some(3) };
        assert_eq!(health.resolved_total(), Some(10));
        assert_eq!(health.online_percent(10), 70);

        let health = AgentHealth { total: None, online: Some(2), offline: Some(1) };
        assert_eq!(health.resolved_total(), Some(3));
        assert_eq!(health.online_percent(3), 67);

        assert_eq!(AgentHealth::default().resolved_total(), None);
        assert_eq!(AgentHealth::default().online_percent(0), 0);
    }
}
