use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "zbx-digest")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_TIME"), ")"))]
#[command(about = "Zabbix incident digest: Markdown/CSV report of problem events", long_about = None)]
pub struct Cli {
    /// First day of the report window (YYYY-MM-DD, local time)
    #[arg(long = "from", value_name = "YYYY-MM-DD")]
    pub from_date: Option<String>,

    /// Last day of the report window, inclusive (YYYY-MM-DD, local time)
    #[arg(long = "to", value_name = "YYYY-MM-DD")]
    pub to_date: Option<String>,

    /// Write the Markdown report to PATH instead of stdout
    #[arg(long, value_name = "PATH")]
    pub out_md: Option<PathBuf>,

    /// Write the CSV export to PATH
    #[arg(long, value_name = "PATH")]
    pub out_csv: Option<PathBuf>,

    /// Regex matched against host and problem name for auto-ack (e.g. '(lab|dev)')
    #[arg(long, value_name = "PATTERN")]
    pub ack_regex: Option<String>,

    /// Acknowledge events matching --ack-regex
    #[arg(long, requires = "ack_regex")]
    pub auto_ack: bool,

    /// Message attached to acknowledgments
    #[arg(long, value_name = "TEXT", default_value = crate::digest::ack::DEFAULT_ACK_MESSAGE)]
    pub ack_message: String,

    /// Simulate actions (default)
    #[arg(long, overrides_with = "no_dry_run")]
    pub dry_run: bool,

    /// Execute real actions
    #[arg(long, overrides_with = "dry_run")]
    pub no_dry_run: bool,

    /// Override ZBX_VERIFY_SSL
    #[arg(long, value_name = "true|false")]
    pub verify_ssl: Option<bool>,

    /// Override ZBX_URL (JSON-RPC endpoint)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Override ZBX_USER
    #[arg(long)]
    pub user: Option<String>,

    /// Override ZBX_PASS
    #[arg(long)]
    pub password: Option<String>,

    /// Override ZBX_TIMEOUT (seconds per request)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Report title
    #[arg(long, default_value = crate::digest::output::DEFAULT_TITLE)]
    pub title: String,

    /// Use canned events (no Zabbix call)
    #[arg(long)]
    pub mock: bool,

    /// Print progress (login, fetch window, counts, JSON-RPC calls)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn dry_run(&self) -> bool {
        !self.no_dry_run
    }
}
