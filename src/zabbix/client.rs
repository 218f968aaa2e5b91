//! JSON-RPC 2.0 session against a Zabbix frontend

use crate::utils::{DigestError, Event, Result};
use crate::zabbix::transport::{ClientConfig, HttpTransport, Transport};
use serde_json::{json, Value};
use tracing::debug;

/// `event.get` value filter: 1 = problem events
pub const PROBLEM_EVENTS: u8 = 1;

/// `event.acknowledge` action bitmask: acknowledge (2) + add message (4)
pub const ACK_ACTION: u8 = 6;

pub struct ZabbixClient<T: Transport> {
    transport: T,
    auth: Option<String>,
    request_id: u64,
}

impl ZabbixClient<HttpTransport> {
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: Transport> ZabbixClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport, auth: None, request_id: 0 }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn call(&mut self, method: &str, params: Value, with_auth: bool) -> Result<Value> {
        self.request_id += 1;

        let mut payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": self.request_id,
        });
        if with_auth {
            if let Some(token) = &self.auth {
                payload["auth"] = Value::String(token.clone());
            }
        }

        debug!(method, id = self.request_id, "json-rpc request");
        let mut reply = self.transport.post(&payload)?;

        if let Some(err) = reply.get("error") {
            return Err(DigestError::Api {
                method: method.to_string(),
                detail: err.clone(),
            });
        }

        reply
            .get_mut("result")
            .map(Value::take)
            .ok_or_else(|| DigestError::Parse(format!("{}: reply has neither result nor error", method)))
    }

    pub fn login(&mut self, user: &str, password: &str) -> Result<()> {
        let result = self.call(
            "user.login",
            json!({ "user": user, "password": password }),
            false,
        )?;

        match result {
            Value::String(token) => {
                self.auth = Some(token);
                Ok(())
            }
            other => Err(DigestError::Parse(format!("user.login returned non-string token: {}", other))),
        }
    }

    /// Events inside `[time_from, time_till]`, oldest first.
    pub fn event_get(
        &mut self,
        time_from: i64,
        time_till: i64,
        severities: Option<&[u8]>,
        value: u8,
    ) -> Result<Vec<Event>> {
        let mut params = json!({
            "output": ["eventid", "clock", "severity", "name", "r_eventid", "acknowledged"],
            "selectHosts": ["hostid", "host"],
            "select_acknowledges": "extend",
            "time_from": time_from,
            "time_till": time_till,
            "value": value,
            "sortfield": ["clock"],
            "sortorder": "ASC",
        });
        if let Some(sev) = severities.filter(|s| !s.is_empty()) {
            params["severities"] = json!(sev);
        }

        let result = self.call("event.get", params, true)?;
        serde_json::from_value(result)
            .map_err(|e| DigestError::Parse(format!("event.get result: {}", e)))
    }

    pub fn event_ack(&mut self, event_ids: &[String], message: &str) -> Result<Value> {
        self.call(
            "event.acknowledge",
            json!({
                "eventids": event_ids,
                "action": ACK_ACTION,
                "message": message,
            }),
            true,
        )
    }
}
