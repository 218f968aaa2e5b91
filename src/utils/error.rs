use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Zabbix API error in {method}: {detail}")]
    Api {
        method: String,
        detail: serde_json::Value,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl DigestError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<reqwest::Error> for DigestError {
    fn from(e: reqwest::Error) -> Self {
        DigestError::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
