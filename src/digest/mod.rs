pub mod ack;
pub mod mock;
pub mod output;
pub mod report;

use ack::{AckOutcome, AckPlan};
use anyhow::Context;
use crate::cli::Cli;
use crate::config::{env_lookup, Settings};
use crate::utils::time::TimeWindow;
use crate::utils::{DigestError, Event};
use crate::zabbix::{HttpTransport, Transport, ZabbixClient, PROBLEM_EVENTS};
use report::Summary;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the rendered digest goes and what happens after it is written.
#[derive(Debug, Clone)]
pub struct DigestOptions {
    pub title: String,
    pub out_md: Option<PathBuf>,
    pub out_csv: Option<PathBuf>,
    pub ack: Option<AckPlan>,
}

impl DigestOptions {
    pub fn from_cli(cli: &Cli) -> crate::utils::Result<Self> {
        let ack = match (&cli.ack_regex, cli.auto_ack) {
            (Some(pattern), true) => Some(AckPlan::new(pattern, &cli.ack_message, !cli.dry_run())?),
            (None, true) => return Err(DigestError::config("--auto-ack needs --ack-regex")),
            _ => None,
        };

        Ok(Self {
            title: cli.title.clone(),
            out_md: cli.out_md.clone(),
            out_csv: cli.out_csv.clone(),
            ack,
        })
    }
}

pub fn run_digest(cli: &Cli) -> anyhow::Result<()> {
    let opts = DigestOptions::from_cli(cli)?;

    if cli.mock {
        let events = mock::mock_events();
        info!("Using {} mock events", events.len());
        publish::<HttpTransport>(&events, mock::MOCK_PERIOD, &opts, None)?;
        return Ok(());
    }

    let settings = Settings::resolve(cli, env_lookup)?;
    let window = match (&cli.from_date, &cli.to_date) {
        (Some(from), Some(to)) => TimeWindow::from_dates(from, to)?,
        _ => {
            return Err(DigestError::config(
                "pass --from YYYY-MM-DD and --to YYYY-MM-DD (or use --mock)",
            )
            .into())
        }
    };

    let mut client = ZabbixClient::connect(&settings.client_config())?;
    run_live(&mut client, &settings, &window, &opts)?;
    Ok(())
}

/// login → event.get → publish. Nothing is written unless both calls succeed.
pub fn run_live<T: Transport>(
    client: &mut ZabbixClient<T>,
    settings: &Settings,
    window: &TimeWindow,
    opts: &DigestOptions,
) -> anyhow::Result<Summary> {
    info!("Login to {} (verify_ssl={})", settings.url, settings.verify_ssl);
    client
        .login(&settings.user, &settings.password)
        .with_context(|| format!("login to {} failed", settings.url))?;
    info!("Authenticated: {}", client.is_authenticated());

    info!("Collecting events for {}", window.label);
    let events = client
        .event_get(window.from, window.till, None, PROBLEM_EVENTS)
        .context("event.get failed")?;

    publish(&events, &window.label, opts, Some(client))
}

/// Summarize, render, write, then acknowledge.
pub fn publish<T: Transport>(
    events: &[Event],
    period: &str,
    opts: &DigestOptions,
    client: Option<&mut ZabbixClient<T>>,
) -> anyhow::Result<Summary> {
    info!("Events collected: {}", events.len());
    let summary = report::summarize(events);
    info!("{} distinct hosts, {} severities", summary.by_host.len(), summary.by_severity.len());

    // render everything before touching the filesystem
    let markdown = output::render_markdown(&summary, &opts.title, Some(period));
    let csv = match &opts.out_csv {
        Some(_) => Some(output::render_csv(&summary.rows)?),
        None => None,
    };

    match &opts.out_md {
        Some(path) => {
            write_file(path, markdown.as_bytes())?;
            eprintln!("[OK] Markdown written to: {}", path.display());
        }
        None => println!("{}", markdown),
    }

    if let (Some(path), Some(bytes)) = (&opts.out_csv, &csv) {
        write_file(path, bytes)?;
        eprintln!("[OK] CSV written to: {}", path.display());
    }

    if let Some(plan) = &opts.ack {
        match plan.apply(&summary.rows, client).context("event.acknowledge failed")? {
            AckOutcome::NoMatch => eprintln!("[ACK] no events match {}", plan.pattern),
            AckOutcome::Simulated(ids) => {
                eprintln!("[DRY-RUN] would acknowledge {} event(s): {}", ids.len(), ids.join(", "))
            }
            AckOutcome::Acknowledged { eventids, result } => {
                info!(%result, "event.acknowledge result");
                eprintln!("[ACK] acknowledged {} event(s): {}", eventids.len(), eventids.join(", "))
            }
        }
    }

    Ok(summary)
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes)
        .map_err(DigestError::from)
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zabbix::testing::FakeTransport;
    use serde_json::json;
    use std::time::Duration;

    fn settings() -> Settings {
        Settings {
            url: "https://zbx.example/api_jsonrpc.php".to_string(),
            user: "Admin".to_string(),
            password: "zabbix".to_string(),
            verify_ssl: true,
            timeout: Duration::from_secs(30),
        }
    }

    fn window() -> TimeWindow {
        TimeWindow { from: 1756771200, till: 1756857599, label: "2025-09-02 → 2025-09-02".to_string() }
    }

    fn options(dir: &Path, ack: Option<AckPlan>) -> DigestOptions {
        DigestOptions {
            title: output::DEFAULT_TITLE.to_string(),
            out_md: Some(dir.join("digest.md")),
            out_csv: Some(dir.join("digest.csv")),
            ack,
        }
    }

    fn mock_events_json() -> serde_json::Value {
        serde_json::to_value(mock::mock_events()).unwrap()
    }

    fn healthy_server() -> FakeTransport {
        FakeTransport::new()
            .reply("user.login", json!({"jsonrpc": "2.0", "result": "tok", "id": 1}))
            .reply("event.get", json!({"jsonrpc": "2.0", "result": mock_events_json(), "id": 2}))
            .reply("event.acknowledge", json!({"jsonrpc": "2.0", "result": {"eventids": ["30003"]}, "id": 3}))
    }

    #[test]
    fn live_run_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path(), None);
        let mut client = ZabbixClient::new(healthy_server());

        let summary = run_live(&mut client, &settings(), &window(), &opts).unwrap();
        assert_eq!(summary.rows.len(), 5);

        let md = std::fs::read_to_string(dir.path().join("digest.md")).unwrap();
        assert!(md.contains("**Period:** 2025-09-02 → 2025-09-02"));
        assert!(md.contains("- `app-01` (2)"));

        let mut rdr = csv::Reader::from_path(dir.path().join("digest.csv")).unwrap();
        let rows: Vec<report::ReportRow> = rdr.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows, summary.rows);

        assert_eq!(client.transport().methods(), vec!["user.login", "event.get"]);
    }

    #[test]
    fn login_failure_stops_before_fetch_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path(), None);
        let mut client = ZabbixClient::new(FakeTransport::new().reply(
            "user.login",
            json!({"jsonrpc": "2.0", "error": {"code": -32602, "message": "Invalid params.", "data": "Login name or password is incorrect."}, "id": 1}),
        ));

        let err = run_live(&mut client, &settings(), &window(), &opts).unwrap_err();
        assert!(matches!(err.downcast_ref::<DigestError>(), Some(DigestError::Api { .. })));
        assert!(format!("{:#}", err).contains("Login name or password is incorrect."));

        assert_eq!(client.transport().methods(), vec!["user.login"]);
        assert!(!dir.path().join("digest.md").exists());
        assert!(!dir.path().join("digest.csv").exists());
    }

    #[test]
    fn fetch_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path(), None);
        let mut client = ZabbixClient::new(
            FakeTransport::new().reply("user.login", json!({"result": "tok"})),
        );

        assert!(run_live(&mut client, &settings(), &window(), &opts).is_err());
        assert!(!dir.path().join("digest.md").exists());
    }

    #[test]
    fn unmatched_ack_pattern_never_acknowledges() {
        let dir = tempfile::tempdir().unwrap();
        let plan = AckPlan::new("^staging-", ack::DEFAULT_ACK_MESSAGE, true).unwrap();
        let opts = options(dir.path(), Some(plan));
        let mut client = ZabbixClient::new(healthy_server());

        run_live(&mut client, &settings(), &window(), &opts).unwrap();
        assert!(!client.transport().methods().contains(&"event.acknowledge".to_string()));
    }

    #[test]
    fn matched_ack_runs_after_writes() {
        let dir = tempfile::tempdir().unwrap();
        let plan = AckPlan::new("(lab|dev)", ack::DEFAULT_ACK_MESSAGE, true).unwrap();
        let opts = options(dir.path(), Some(plan));
        let mut client = ZabbixClient::new(healthy_server());

        run_live(&mut client, &settings(), &window(), &opts).unwrap();
        let sent = client.transport().requests();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[2]["method"], "event.acknowledge");
        assert_eq!(sent[2]["params"]["eventids"], json!(["30003"]));
        assert!(dir.path().join("digest.md").exists());
    }

    #[test]
    fn dry_run_ack_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let plan = AckPlan::new("(lab|dev)", ack::DEFAULT_ACK_MESSAGE, false).unwrap();
        let opts = options(dir.path(), Some(plan));
        let mut client = ZabbixClient::new(healthy_server());

        run_live(&mut client, &settings(), &window(), &opts).unwrap();
        assert_eq!(client.transport().methods(), vec!["user.login", "event.get"]);
    }

    #[test]
    fn mock_publish_needs_no_client() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path(), None);

        let summary = publish::<FakeTransport>(&mock::mock_events(), mock::MOCK_PERIOD, &opts, None).unwrap();
        assert_eq!(summary.by_severity[0], ("Warning".to_string(), 2));

        let md = std::fs::read_to_string(dir.path().join("digest.md")).unwrap();
        assert!(md.contains("**Period:** MOCK DATA"));
    }

    #[test]
    fn auto_ack_without_pattern_is_config_error() {
        use clap::Parser;
        let mut cli = Cli::try_parse_from(["zbx-digest", "--mock"]).unwrap();
        cli.auto_ack = true;
        let err = DigestOptions::from_cli(&cli).unwrap_err();
        assert!(matches!(err, DigestError::Config(_)));
    }

    #[test]
    fn live_run_requires_dates() {
        use clap::Parser;
        let cli = Cli::try_parse_from([
            "zbx-digest", "--url", "http://127.0.0.1:9/", "--user", "a", "--password", "b",
        ])
        .unwrap();
        let err = run_digest(&cli).unwrap_err();
        assert!(matches!(err.downcast_ref::<DigestError>(), Some(DigestError::Config(_))));
    }
}
