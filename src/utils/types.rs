use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;

/// Host label used when an event carries no host at all.
pub const NO_HOST: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    NotClassified,
    Information,
    Warning,
    Average,
    High,
    Disaster,
    Unknown(i64),
}

impl Severity {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Severity::NotClassified,
            1 => Severity::Information,
            2 => Severity::Warning,
            3 => Severity::Average,
            4 => Severity::High,
            5 => Severity::Disaster,
            other => Severity::Unknown(other),
        }
    }

    pub fn label(self) -> Cow<'static, str> {
        match self {
            Severity::NotClassified => Cow::Borrowed("Not classified"),
            Severity::Information => Cow::Borrowed("Information"),
            Severity::Warning => Cow::Borrowed("Warning"),
            Severity::Average => Cow::Borrowed("Average"),
            Severity::High => Cow::Borrowed("High"),
            Severity::Disaster => Cow::Borrowed("Disaster"),
            Severity::Unknown(code) => Cow::Owned(code.to_string()),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRef {
    #[serde(default, deserialize_with = "string_or_int")]
    pub hostid: String,
    #[serde(default)]
    pub host: String,
}

/// One problem event as returned by `event.get`.
///
/// Zabbix encodes numbers as JSON strings; both forms are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "string_or_int")]
    pub eventid: String,
    #[serde(deserialize_with = "int_or_string")]
    pub clock: i64,
    #[serde(default, deserialize_with = "int_or_string")]
    pub severity: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default = "not_acknowledged", deserialize_with = "string_or_int")]
    pub acknowledged: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_eventid: Option<String>,
    #[serde(default)]
    pub hosts: Vec<HostRef>,
}

impl Event {
    pub fn severity(&self) -> Severity {
        Severity::from_code(self.severity)
    }

    /// First related host, or `-` when the event has none.
    pub fn host_name(&self) -> &str {
        self.hosts.first().map(|h| h.host.as_str()).unwrap_or(NO_HOST)
    }
}

fn not_acknowledged() -> String {
    "0".to_string()
}

// ── serde helpers ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Str(String),
}

fn int_or_string<'de, D>(d: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(d)? {
        Scalar::Int(n) => Ok(n),
        Scalar::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected integer, got {:?}", s))),
    }
}

fn string_or_int<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(d)? {
        Scalar::Int(n) => Ok(n.to_string()),
        Scalar::Str(s) => Ok(s),
    }
}
