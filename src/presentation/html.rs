// HTML rendering of the dashboard page
use crate::application::notifications::BANNER_LIFETIME;
use crate::application::view_state::ViewState;
use crate::domain::chart::ChartSlot;
use crate::domain::notification::Banner;
use crate::domain::view::{ClientSelector, SummaryLabels};
use crate::domain::widget::{HealthGauge, ListItem, RenderedView, TrendRow, Widget, WidgetBody};
use crate::infrastructure::chartjs_backend::chart_config;
use std::fmt::Write;

const CHART_JS_SRC: &str = "https://cdn.jsdelivr.net/npm/chart.js";
const NO_DATA: &str = "No data available";

/// Escapes text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the whole page: header controls, banner, summary labels, stats container and charts.
pub fn render_page(state: &ViewState, title: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n",
        escape(title)
    );
    if state.charts.is_available() {
        let _ = writeln!(html, "<script src=\"{}\"></script>", CHART_JS_SRC);
    }
    html.push_str("</head>\n<body>\n<header class=\"toolbar\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape(title));

    if state.layout.selector {
        html.push_str(&render_selector(&state.selector));
    }
    if state.layout.refresh_button {
        html.push_str("<button id=\"refresh-btn\" type=\"button\">Refresh</button>\n");
    }
    html.push_str("</header>\n");

    if let Some(banner) = state.notifications.current() {
        html.push_str(&render_banner(banner));
    }
    if state.layout.summary_labels {
        html.push_str(&render_summary_labels(&state.summary_labels));
    }

    if state.layout.stats_container {
        html.push_str("<main id=\"stats-container\">\n");
        if let Some(content) = &state.content {
            html.push_str(&render_view(content));
        }
        html.push_str("</main>\n");
    }

    for slot in ChartSlot::ALL {
        if let Some(live) = state.charts.live(slot) {
            let _ = writeln!(
                html,
                "<script>new Chart(document.getElementById(\"{}\"), {});</script>",
                slot.canvas_id(),
                script_json(&chart_config(&live.spec).to_string())
            );
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Keeps serialized JSON from closing the surrounding script element.
fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn render_selector(selector: &ClientSelector) -> String {
    let mut html = String::from("<select id=\"client-select\">\n");
    for option in &selector.options {
        let selected = if selector.selected.as_deref() == Some(option.value.as_str()) {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escape(&option.value),
            selected,
            escape(&option.label)
        );
    }
    html.push_str("</select>\n");
    html
}

/// The banner removes itself in the browser too, so a page left open does not keep it.
fn render_banner(banner: &Banner) -> String {
    let id = format!("banner-{}", banner.id);
    format!(
        "<div id=\"{id}\" class=\"alert {} alert-dismissible\" role=\"alert\">{}\
         <button type=\"button\" class=\"btn-close\" aria-label=\"Close\" \
         onclick=\"this.parentElement.remove()\"></button></div>\n\
         <script>setTimeout(() => document.getElementById(\"{id}\")?.remove(), {});</script>\n",
        banner.kind.css_class(),
        escape(&banner.message),
        BANNER_LIFETIME.as_millis()
    )
}

fn render_summary_labels(labels: &SummaryLabels) -> String {
    let value = |v: &Option<String>| escape(v.as_deref().unwrap_or("0"));
    format!(
        "<div class=\"severity-summary\">\
         <span id=\"critical-count\">{}</span>\
         <span id=\"high-count\">{}</span>\
         <span id=\"medium-count\">{}</span>\
         <span id=\"low-count\">{}</span></div>\n",
        value(&labels.critical),
        value(&labels.high),
        value(&labels.medium),
        value(&labels.low)
    )
}

/// Renders the stats container content.
pub fn render_view(view: &RenderedView) -> String {
    view.widgets.iter().map(render_widget).collect()
}

fn render_widget(widget: &Widget) -> String {
    let body = match &widget.body {
        WidgetBody::Summary(strip) => format!(
            "<div class=\"summary-item\"><span>Client</span><strong>{}</strong></div>\
             <div class=\"summary-item\"><span>Alerts (24h)</span><strong>{}</strong></div>\
             <div class=\"summary-item\"><span>Critical</span><strong>{}</strong></div>\
             <div class=\"summary-item\"><span>Agents</span><strong>{}</strong></div>",
            escape(&strip.client),
            strip.alerts_24h,
            strip.critical,
            strip.total_agents.map_or_else(|| "\u{2014}".to_string(), |t| t.to_string())
        ),
        WidgetBody::Value(value) => format!("<div class=\"stat-value\">{}</div>", escape(value)),
        WidgetBody::Chart(slot) => format!("<canvas id=\"{}\"></canvas>", slot.canvas_id()),
        WidgetBody::Gauge(gauge) => render_gauge(gauge),
        WidgetBody::List(items) => render_list(items),
        WidgetBody::Trends(rows) => render_trends(rows),
        WidgetBody::Error { message, note } => {
            let mut html = format!("<div class=\"alert alert-danger\">{}</div>", escape(message));
            if let Some(note) = note {
                let _ = write!(html, "<div class=\"alert alert-info\">{}</div>", escape(note));
            }
            html
        }
        WidgetBody::NoData => format!("<p class=\"no-data\">{}</p>", NO_DATA),
    };

    format!(
        "<section class=\"card\" id=\"{}\"><h2>{}</h2>{}</section>\n",
        widget.id.dom_id(),
        escape(widget.title),
        body
    )
}

fn render_gauge(gauge: &HealthGauge) -> String {
    format!(
        "<div class=\"progress\"><div class=\"progress-bar\" style=\"width: {pct}%\">{pct}%</div></div>\
         <div class=\"tile online\"><span>Online</span><strong>{}</strong></div>\
         <div class=\"tile offline\"><span>Offline</span><strong>{}</strong></div>",
        gauge.online,
        gauge.offline,
        pct = gauge.percent_online
    )
}

fn render_list(items: &[ListItem]) -> String {
    let mut html = String::from("<ol>");
    for item in items {
        let detail = item
            .detail
            .as_deref()
            .map(|d| format!(" <small>{}</small>", escape(d)))
            .unwrap_or_default();
        let _ = write!(
            html,
            "<li><span class=\"label\">{}</span>{}<span class=\"count\">{}</span></li>",
            escape(&item.label),
            detail,
            item.count
        );
    }
    html.push_str("</ol>");
    html
}

fn render_trends(rows: &[TrendRow]) -> String {
    let mut html = String::from("<table><tbody>");
    for row in rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(&row.date),
            row.count
        );
    }
    html.push_str("</tbody></table>");
    html
}
