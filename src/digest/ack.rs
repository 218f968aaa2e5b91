//! Bulk acknowledgment of events whose host or problem name matches a regex

use crate::digest::report::ReportRow;
use crate::utils::{DigestError, Result};
use crate::zabbix::{Transport, ZabbixClient};
use regex::Regex;
use serde_json::Value;
use tracing::{info, warn};

pub const DEFAULT_ACK_MESSAGE: &str = "Auto-ack by zbx-digest";

#[derive(Debug, Clone)]
pub struct AckPlan {
    pub pattern: Regex,
    pub message: String,
    /// false = dry run, nothing is sent
    pub execute: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AckOutcome {
    NoMatch,
    Simulated(Vec<String>),
    Acknowledged { eventids: Vec<String>, result: Value },
}

impl AckPlan {
    pub fn new(pattern: &str, message: &str, execute: bool) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| DigestError::config(format!("invalid --ack-regex {:?}: {}", pattern, e)))?;
        Ok(Self { pattern, message: message.to_string(), execute })
    }

    /// Ids of unacknowledged rows whose host or name matches.
    pub fn select(&self, rows: &[ReportRow]) -> Vec<String> {
        rows.iter()
            .filter(|r| r.acknowledged != "1")
            .filter(|r| self.pattern.is_match(&r.host) || self.pattern.is_match(&r.name))
            .map(|r| r.eventid.clone())
            .collect()
    }

    /// Without a client (mock runs) the plan is always simulated.
    pub fn apply<T: Transport>(
        &self,
        rows: &[ReportRow],
        client: Option<&mut ZabbixClient<T>>,
    ) -> Result<AckOutcome> {
        let eventids = self.select(rows);
        if eventids.is_empty() {
            info!(pattern = %self.pattern, "no events matched, nothing to acknowledge");
            return Ok(AckOutcome::NoMatch);
        }

        match client {
            Some(client) if self.execute => {
                info!(count = eventids.len(), "acknowledging events");
                let result = client.event_ack(&eventids, &self.message)?;
                Ok(AckOutcome::Acknowledged { eventids, result })
            }
            None if self.execute => {
                warn!("no Zabbix session (mock data), acknowledgment simulated");
                Ok(AckOutcome::Simulated(eventids))
            }
            _ => Ok(AckOutcome::Simulated(eventids)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::mock::mock_events;
    use crate::digest::report::summarize;
    use crate::zabbix::testing::FakeTransport;
    use serde_json::json;

    fn acking_client() -> ZabbixClient<FakeTransport> {
        ZabbixClient::new(FakeTransport::new().reply(
            "event.acknowledge",
            json!({"result": {"eventids": ["30003"]}}),
        ))
    }

    #[test]
    fn matches_host_or_name_and_skips_acknowledged() {
        let rows = summarize(&mock_events()).rows;

        let plan = AckPlan::new("(lab|dev)", DEFAULT_ACK_MESSAGE, false).unwrap();
        assert_eq!(plan.select(&rows), vec!["30003"]);

        let plan = AckPlan::new("Memory", DEFAULT_ACK_MESSAGE, false).unwrap();
        assert_eq!(plan.select(&rows), vec!["30005"]);

        // 30002 is already acknowledged
        let plan = AckPlan::new("db-01", DEFAULT_ACK_MESSAGE, false).unwrap();
        assert!(plan.select(&rows).is_empty());
    }

    #[test]
    fn invalid_pattern_is_config_error() {
        let err = AckPlan::new("(unclosed", DEFAULT_ACK_MESSAGE, true).unwrap_err();
        assert!(matches!(err, DigestError::Config(_)));
    }

    #[test]
    fn no_match_never_calls_acknowledge() {
        let rows = summarize(&mock_events()).rows;
        let mut client = acking_client();
        let plan = AckPlan::new("^nothing-here$", DEFAULT_ACK_MESSAGE, true).unwrap();

        let outcome = plan.apply(&rows, Some(&mut client)).unwrap();
        assert_eq!(outcome, AckOutcome::NoMatch);
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn dry_run_sends_nothing() {
        let rows = summarize(&mock_events()).rows;
        let mut client = acking_client();
        let plan = AckPlan::new("lab", DEFAULT_ACK_MESSAGE, false).unwrap();

        let outcome = plan.apply(&rows, Some(&mut client)).unwrap();
        assert_eq!(outcome, AckOutcome::Simulated(vec!["30003".to_string()]));
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn execute_sends_matched_ids() {
        let rows = summarize(&mock_events()).rows;
        let mut client = acking_client();
        let plan = AckPlan::new("lab", "lab noise", true).unwrap();

        let outcome = plan.apply(&rows, Some(&mut client)).unwrap();
        assert!(matches!(outcome, AckOutcome::Acknowledged { ref eventids, .. } if eventids == &["30003"]));

        let sent = client.transport().requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["method"], "event.acknowledge");
        assert_eq!(sent[0]["params"]["eventids"], json!(["30003"]));
        assert_eq!(sent[0]["params"]["message"], "lab noise");
    }

    #[test]
    fn execute_without_client_is_simulated() {
        let rows = summarize(&mock_events()).rows;
        let plan = AckPlan::new("app", DEFAULT_ACK_MESSAGE, true).unwrap();

        let outcome = plan.apply::<FakeTransport>(&rows, None).unwrap();
        assert_eq!(
            outcome,
            AckOutcome::Simulated(vec!["30001".to_string(), "30005".to_string()])
        );
    }
}
