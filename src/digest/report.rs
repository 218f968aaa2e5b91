//! Aggregation: raw events → Summary

use crate::utils::Event;
use crate::utils::time::format_timestamp;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const TOP_HOSTS: usize = 10;

/// One line of the events table / CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub eventid: String,
    pub time: String,
    pub host: String,
    pub severity: String,
    pub name: String,
    pub acknowledged: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Severity label → count, most frequent first
    pub by_severity: Vec<(String, usize)>,
    /// Every host → count, most frequent first
    pub by_host: Vec<(String, usize)>,
    pub top_hosts: Vec<(String, usize)>,
    pub rows: Vec<ReportRow>,
}

/// Frequency counter that remembers first-seen order.
///
/// `most_common` is a stable sort on descending count, so equal counts keep
/// the order in which keys were first added.
#[derive(Debug, Default)]
pub struct Tally {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn most_common(&self) -> Vec<(String, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

pub fn summarize(events: &[Event]) -> Summary {
    let mut by_severity = Tally::default();
    let mut by_host = Tally::default();
    let mut rows = Vec::with_capacity(events.len());

    for ev in events {
        let severity = ev.severity().label();
        let host = ev.host_name();

        by_severity.add(&severity);
        by_host.add(host);

        rows.push(ReportRow {
            eventid: ev.eventid.clone(),
            time: format_timestamp(ev.clock),
            host: host.to_string(),
            severity: severity.to_uppercase(),
            name: ev.name.clone(),
            acknowledged: ev.acknowledged.clone(),
        });
    }

    let by_host = by_host.most_common();
    let top_hosts = by_host.iter().take(TOP_HOSTS).cloned().collect();

    Summary {
        by_severity: by_severity.most_common(),
        by_host,
        top_hosts,
        rows,
    }
}
