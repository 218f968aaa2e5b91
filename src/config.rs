//! Connection settings: `.env` / environment, overridden by CLI flags

use crate::cli::Cli;
use crate::utils::{DigestError, Result};
use crate::zabbix::transport::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use std::time::Duration;

pub const ENV_URL: &str = "ZBX_URL";
pub const ENV_USER: &str = "ZBX_USER";
pub const ENV_PASS: &str = "ZBX_PASS";
pub const ENV_VERIFY_SSL: &str = "ZBX_VERIFY_SSL";
pub const ENV_TIMEOUT: &str = "ZBX_TIMEOUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub url: String,
    pub user: String,
    pub password: String,
    pub verify_ssl: bool,
    pub timeout: Duration,
}

impl Settings {
    /// `lookup` is the environment source; `env_lookup` in production.
    pub fn resolve<F>(cli: &Cli, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = cli.url.clone().or_else(|| lookup(ENV_URL));
        let user = cli.user.clone().or_else(|| lookup(ENV_USER));
        let password = cli.password.clone().or_else(|| lookup(ENV_PASS));

        let (url, user, password) = match (url, user, password) {
            (Some(u), Some(n), Some(p)) => (u, n, p),
            (u, n, p) => {
                let missing: Vec<&str> = [(ENV_URL, u.is_none()), (ENV_USER, n.is_none()), (ENV_PASS, p.is_none())]
                    .iter()
                    .filter(|(_, absent)| *absent)
                    .map(|(name, _)| *name)
                    .collect();
                return Err(DigestError::config(format!(
                    "set {} in .env (or use --mock)", missing.join(", ")
                )));
            }
        };

        let verify_ssl = match cli.verify_ssl {
            Some(v) => v,
            None => lookup(ENV_VERIFY_SSL)
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(true),
        };

        let timeout_secs = match cli.timeout {
            Some(t) => t,
            None => match lookup(ENV_TIMEOUT) {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    DigestError::config(format!("{} must be a number of seconds, got {:?}", ENV_TIMEOUT, raw))
                })?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };

        Ok(Self {
            url,
            user,
            password,
            verify_ssl,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            verify_ssl: self.verify_ssl,
            timeout: self.timeout,
            ..ClientConfig::new(self.url.clone())
        }
    }
}

/// Process environment; empty values count as unset.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
