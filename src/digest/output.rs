//! 输出层：Summary → Markdown document / CSV bytes

use crate::digest::report::{ReportRow, Summary};
use crate::utils::{DigestError, Result};

pub const DEFAULT_TITLE: &str = "Zabbix Incident Digest";

// ── Markdown ────────────────────────────────────────────────────────────────

pub fn render_markdown(summary: &Summary, title: &str, period: Option<&str>) -> String {
    let mut lines = vec![format!("# {}", title), String::new()];

    if let Some(p) = period.filter(|p| !p.is_empty()) {
        lines.push(format!("**Period:** {}", p));
        lines.push(String::new());
    }

    lines.push("## Severity Summary".to_string());
    for (sev, count) in &summary.by_severity {
        lines.push(format!("- **{}**: {}", sev.to_uppercase(), count));
    }
    lines.push(String::new());

    lines.push("## Top Hosts".to_string());
    for (host, count) in &summary.top_hosts {
        lines.push(format!("- `{}` ({})", host, count));
    }
    lines.push(String::new());

    lines.push("## Events".to_string());
    lines.push("| EventID | Time | Host | Severity | Problem | Ack |".to_string());
    lines.push("|---------|------|------|----------|---------|-----|".to_string());
    for r in &summary.rows {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            cell(&r.eventid),
            cell(&r.time),
            cell(&r.host),
            cell(&r.severity),
            cell(&r.name),
            cell(&r.acknowledged),
        ));
    }
    lines.push(String::new());

    lines.join("\n")
}

// a bare `|` would end the cell early
fn cell(s: &str) -> String {
    s.replace('|', "\\|")
}

// ── CSV ─────────────────────────────────────────────────────────────────────

/// Header `eventid,time,host,severity,name,acknowledged`, one record per row.
pub fn render_csv(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        wtr.write_record(["eventid", "time", "host", "severity", "name", "acknowledged"])?;
    }
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.into_inner()
        .map_err(|e| DigestError::Io(std::io::Error::other(e.to_string())))
}
