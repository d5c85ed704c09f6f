// Plain-text rendering of the dashboard for the terminal
use crate::application::view_state::ViewState;
use crate::domain::widget::{Widget, WidgetBody};
use std::fmt::Write;

pub fn render_text(state: &ViewState) -> String {
    let mut out = String::new();

    if let Some(banner) = state.notifications.current() {
        let _ = writeln!(out, "[{:?}] {}", banner.kind, banner.message);
    }

    let Some(content) = &state.content else {
        out.push_str("(nothing rendered yet)\n");
        return out;
    };

    for widget in &content.widgets {
        render_widget(&mut out, state, widget);
    }
    out
}

fn render_widget(out: &mut String, state: &ViewState, widget: &Widget) {
    let _ = writeln!(out, "\n{}", widget.title);
    match &widget.body {
        WidgetBody::Summary(strip) => {
            let agents = strip
                .total_agents
                .map_or_else(|| "\u{2014}".to_string(), |t| t.to_string());
            let _ = writeln!(out, "  Client: {}", strip.client);
            let _ = writeln!(out, "  Alerts (24h): {}", strip.alerts_24h);
            let _ = writeln!(out, "  Critical: {}", strip.critical);
            let _ = writeln!(out, "  Agents: {}", agents);
        }
        WidgetBody::Value(value) => {
            let _ = writeln!(out, "  {}", value);
        }
        WidgetBody::Chart(slot) => match state.charts.live(*slot) {
            Some(live) => {
                for (label, value) in live.spec.labels.iter().zip(&live.spec.values) {
                    let _ = writeln!(out, "  {:>6}  {}", label, value);
                }
            }
            None => out.push_str("  (chart unavailable)\n"),
        },
        WidgetBody::Gauge(gauge) => {
            let _ = writeln!(
                out,
                "  {}% online ({} online, {} offline, {} total)",
                gauge.percent_online, gauge.online, gauge.offline, gauge.total
            );
        }
        WidgetBody::List(items) => {
            for (rank, item) in items.iter().enumerate() {
                let detail = item
                    .detail
                    .as_deref()
                    .map(|d| format!(" ({})", d))
                    .unwrap_or_default();
                let _ = writeln!(out, "  {}. {}{}: {}", rank + 1, item.label, detail, item.count);
            }
        }
        WidgetBody::Trends(rows) => {
            for row in rows {
                let _ = writeln!(out, "  {}: {}", row.date, row.count);
            }
        }
        WidgetBody::Error { message, note } => {
            let _ = writeln!(out, "  {}", message);
            if let Some(note) = note {
                let _ = writeln!(out, "  {}", note);
            }
        }
        WidgetBody::NoData => out.push_str("  No data available\n"),
    }
}
