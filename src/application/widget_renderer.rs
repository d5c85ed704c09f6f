// Widget renderer - Use case for turning a stats payload into the dashboard layout
use crate::domain::chart::ChartSlot;
use crate::domain::stats::DashboardStats;
use crate::domain::widget::{
    HealthGauge, ListItem, NO_CLIENT, RenderedView, SummaryStrip, TrendRow, Widget, WidgetBody,
    WidgetId,
};
use chrono::NaiveDate;

/// Entries shown in each top-N list.
pub const TOP_N: usize = 8;
/// Longest rule description shown before truncation.
pub const DESCRIPTION_MAX_CHARS: usize = 80;
const ELLIPSIS: &str = "...";

pub const DEFAULT_TREND_DATE_FORMAT: &str = "%-m/%-d/%Y";

#[derive(Debug, Clone)]
pub struct WidgetRenderer {
    trend_date_format: String,
}

impl Default for WidgetRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_DATE_FORMAT)
    }
}

impl WidgetRenderer {
    pub fn new(trend_date_format: impl Into<String>) -> Self {
        Self {
            trend_date_format: trend_date_format.into(),
        }
    }

    /// Builds the complete container content. A payload carrying `error` yields only an
    /// error view.
    pub fn render(&self, stats: &DashboardStats, client: Option<&str>) -> RenderedView {
        if let Some(message) = stats.error_message() {
            return RenderedView::error(message, stats.note_message().map(str::to_string));
        }

        RenderedView::new(vec![
            Self::summary_strip(stats, client),
            Self::total_agents(stats),
            Self::alerts_per_hour(stats),
            Self::severity(stats),
            Self::agent_health(stats),
            Self::top_rules(stats),
            Self::top_agents(stats),
            Self::top_source_ips(stats),
            self.alert_trends(stats),
        ])
    }

    fn summary_strip(stats: &DashboardStats, client: Option<&str>) -> Widget {
        let client = client
            .filter(|c| !c.is_empty())
            .unwrap_or(NO_CLIENT)
            .to_string();

        Widget::new(
            WidgetId::Summary,
            "Overview",
            WidgetBody::Summary(SummaryStrip {
                client,
                alerts_24h: stats.alerts_total(),
                critical: stats.critical_count(),
                total_agents: stats.agent_total(),
            }),
        )
    }

    fn total_agents(stats: &DashboardStats) -> Widget {
        let body = match stats.agent_health.as_ref().and_then(|h| h.total) {
            Some(total) => WidgetBody::Value(total.to_string()),
            None => WidgetBody::NoData,
        };
        Widget::new(WidgetId::TotalAgents, "Total Agents", body)
    }

    fn alerts_per_hour(stats: &DashboardStats) -> Widget {
        let body = if stats.alerts_per_hour.is_empty() {
            WidgetBody::NoData
        } else {
            WidgetBody::Chart(ChartSlot::AlertsLine)
        };
        Widget::new(WidgetId::AlertsPerHour, "Alerts per Hour", body)
    }

    fn severity(stats: &DashboardStats) -> Widget {
        let body = if stats.has_severity_data() {
            WidgetBody::Chart(ChartSlot::SeverityDonut)
        } else {
            WidgetBody::NoData
        };
        Widget::new(WidgetId::Severity, "Severity Distribution", body)
    }

    fn agent_health(stats: &DashboardStats) -> Widget {
        let gauge = stats.agent_health.as_ref().and_then(|health| {
            let total = health.resolved_total()?;
            let online = health.online.unwrap_or(0);
            Some(HealthGauge {
                percent_online: health.online_percent(total),
                online,
                offline: health.offline.unwrap_or(total.saturating_sub(online)),
                total,
            })
        });

        let body = gauge.map_or(WidgetBody::NoData, WidgetBody::Gauge);
        Widget::new(WidgetId::AgentHealth, "Agent Health", body)
    }

    fn top_rules(stats: &DashboardStats) -> Widget {
        let items = stats
            .top_rules
            .iter()
            .take(TOP_N)
            .map(|r| ListItem {
                label: truncate_description(&r.description),
                detail: None,
                count: r.count,
            })
            .collect();
        list_widget(WidgetId::TopRules, "Top Rules", items)
    }

    fn top_agents(stats: &DashboardStats) -> Widget {
        let items = stats
            .top_agents
            .iter()
            .take(TOP_N)
            .map(|a| ListItem {
                label: a.agent_name.clone(),
                detail: None,
                count: a.count,
            })
            .collect();
        list_widget(WidgetId::TopAgents, "Top Agents", items)
    }

    fn top_source_ips(stats: &DashboardStats) -> Widget {
        let items = stats
            .top_source_ips
            .iter()
            .take(TOP_N)
            .map(|ip| ListItem {
                label: ip.ip.clone(),
                detail: Some(
                    ip.country
                        .clone()
                        .filter(|c| !c.is_empty())
                        .unwrap_or_else(|| "Unknown".to_string()),
                ),
                count: ip.count,
            })
            .collect();
        list_widget(WidgetId::TopSourceIps, "Top Source IPs", items)
    }

    fn alert_trends(&self, stats: &DashboardStats) -> Widget {
        let body = if stats.alert_trends.is_empty() {
            WidgetBody::NoData
        } else {
            WidgetBody::Trends(
                stats
                    .alert_trends
                    .iter()
                    .map(|t| TrendRow {
                        date: format_trend_date(&t.date, &self.trend_date_format),
                        count: t.count,
                    })
                    .collect(),
            )
        };
        Widget::new(WidgetId::AlertTrends, "Alert Trends (7 days)", body)
    }
}

fn list_widget(id: WidgetId, title: &'static str, items: Vec<ListItem>) -> Widget {
    let body = if items.is_empty() {
        WidgetBody::NoData
    } else {
        WidgetBody::List(items)
    };
    Widget::new(id, title, body)
}

/// Cuts a rule description to `DESCRIPTION_MAX_CHARS` characters plus an ellipsis.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_MAX_CHARS {
        return description.to_string();
    }
    let mut truncated: String = description.chars().take(DESCRIPTION_MAX_CHARS).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Formats a `yyyy-MM-dd` bucket date; unparseable dates are shown as received.
pub fn format_trend_date(raw: &str, format: &str) -> String {
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format(format).to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stats::{
        AgentHealth, DailyAlertCount, RuleCount, SeveritySummary, SourceIpCount,
    };

    fn body(view: &RenderedView, id: WidgetId) -> &WidgetBody {
        &view.find(id).unwrap().body
    }

    #[test]
    fn test_empty_payload_renders_placeholders() {
        let view = WidgetRenderer::default().render(&DashboardStats::default(), None);

        assert_eq!(view.widgets.len(), 9);
        match body(&view, WidgetId::Summary) {
            WidgetBody::Summary(strip) => {
                assert_eq!(strip.client, NO_CLIENT);
                assert_eq!(strip.alerts_24h, 0);
                assert_eq!(strip.critical, 0);
                assert_eq!(strip.total_agents, None);
            }
            other => panic!("unexpected summary body: {:?}", other),
        }
        for id in [
            WidgetId::TotalAgents,
            WidgetId::AlertsPerHour,
            WidgetId::Severity,
            WidgetId::AgentHealth,
            WidgetId::TopRules,
            WidgetId::TopAgents,
            WidgetId::TopSourceIps,
            WidgetId::AlertTrends,
        ] {
            assert!(view.find(id).unwrap().is_placeholder(), "{:?} should be a placeholder", id);
        }
    }

    #[test]
    fn test_summary_critical_from_summary() {
        let stats = DashboardStats {
            severity_summary: Some(SeveritySummary::new(5, 0, 0, 0)),
            ..Default::default()
        };
        let view = WidgetRenderer::default().render(&stats, Some("lab"));

        match body(&view, WidgetId::Summary) {
            WidgetBody::Summary(strip) => {
                assert_eq!(strip.client, "lab");
                assert_eq!(strip.critical, 5);
            }
            other => panic!("unexpected summary body: {:?}", other),
        }
        assert_eq!(body(&view, WidgetId::Severity), &WidgetBody::Chart(ChartSlot::SeverityDonut));
    }

    #[test]
    fn test_agent_health_gauge() {
        let stats = DashboardStats {
            agent_health: Some(AgentHealth { total: Some(10), online: Some(7), offline: Some(3) }),
            ..Default::default()
        };
        let view = WidgetRenderer::default().render(&stats, None);
        assert_eq!(
            body(&view, WidgetId::AgentHealth),
            &WidgetBody::Gauge(HealthGauge { percent_online: 70, online: 7, offline: 3, total: 10 })
        );
        assert_eq!(body(&view, WidgetId::TotalAgents), &WidgetBody::Value("10".to_string()));

        let stats = DashboardStats {
            agent_health: Some(AgentHealth { total: Some(0), online: Some(0), offline: Some(0) }),
            ..Default::default()
        };
        let view = WidgetRenderer::default().render(&stats, None);
        match body(&view, WidgetId::AgentHealth) {
            WidgetBody::Gauge(gauge) => assert_eq!(gauge.percent_online, 0),
            other => panic!("unexpected gauge body: {:?}", other),
        }
    }

    #[test]
    fn test_agent_health_without_total_uses_online_and_offline() {
        let stats = DashboardStats {
            agent_health: Some(AgentHealth { total: None, online: Some(1), offline: Some(3) }),
            ..Default::default()
        };
        let view = WidgetRenderer::default().render(&stats, None);
        match body(&view, WidgetId::AgentHealth) {
            WidgetBody::Gauge(gauge) => {
                assert_eq!(gauge.total, 4);
                assert_eq!(gauge.percent_online, 25);
            }
            other => panic!("unexpected gauge body: {:?}", other),
        }
        assert!(view.find(WidgetId::TotalAgents).unwrap().is_placeholder());

        let stats = DashboardStats {
            agent_health: Some(AgentHealth::default()),
            ..Default::default()
        };
        let view = WidgetRenderer::default().render(&stats, None);
        assert!(view.find(WidgetId::AgentHealth).unwrap().is_placeholder());
    }

    #[test]
    fn test_top_rules_keeps_first_eight_in_order() {
        let stats = DashboardStats {
            top_rules: (0..10)
                .map(|i| RuleCount { description: format!("rule {}", i), count: 100 - i })
                .collect(),
            ..Default::default()
        };
        let view = WidgetRenderer::default().render(&stats, None);

        match body(&view, WidgetId::TopRules) {
            WidgetBody::List(items) => {
                assert_eq!(items.len(), 8);
                let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
                assert_eq!(labels[0], "rule 0");
                assert_eq!(labels[7], "rule 7");
            }
            other => panic!("unexpected list body: {:?}", other),
        }
    }

    #[test]
    fn test_truncate_description() {
        let short = "a".repeat(80);
        assert_eq!(truncate_description(&short), short);

        let long = "b".repeat(81);
        let truncated = truncate_description(&long);
        assert_eq!(truncated, format!("{}...", "b".repeat(80)));

        let multibyte = "é".repeat(90);
        assert_eq!(truncate_description(&multibyte).chars().count(), 83);
    }

    #[test]
    fn test_source_ip_country_defaults_to_unknown() {
        let stats = DashboardStats {
            top_source_ips: vec![
                SourceIpCount { ip: "10.0.0.1".into(), count: 3, country: Some("France".into()) },
                SourceIpCount { ip: "10.0.0.2".into(), count: 1, country: None },
            ],
            ..Default::default()
        };
        let view = WidgetRenderer::default().render(&stats, None);
        match body(&view, WidgetId::TopSourceIps) {
            WidgetBody::List(items) => {
                assert_eq!(items[0].detail.as_deref(), Some("France"));
                assert_eq!(items[1].detail.as_deref(), Some("Unknown"));
            }
            other => panic!("unexpected list body: {:?}", other),
        }
    }

    #[test]
    fn test_alert_trend_dates() {
        let stats = DashboardStats {
            alert_trends: vec![
                DailyAlertCount { date: "2025-03-07".into(), count: 12 },
                DailyAlertCount { date: "yesterday".into(), count: 1 },
            ],
            ..Default::default()
        };
        let view = WidgetRenderer::default().render(&stats, None);
        assert_eq!(
            body(&view, WidgetId::AlertTrends),
            &WidgetBody::Trends(vec![
                TrendRow { date: "3/7/2025".into(), count: 12 },
                TrendRow { date: "yesterday".into(), count: 1 },
            ])
        );
    }

    #[test]
    fn test_error_payload_short_circuits() {
        let stats = DashboardStats {
            error: Some("boom".into()),
            note: Some("index missing".into()),
            top_rules: vec![RuleCount { description: "x".into(), count: 1 }],
            ..Default::default()
        };
        let view = WidgetRenderer::default().render(&stats, Some("lab"));

        assert_eq!(view, RenderedView::error("boom", Some("index missing".to_string())));
        assert!(view.is_error());
        assert!(!view.has_chart_placeholder(ChartSlot::AlertsLine));
    }
}
