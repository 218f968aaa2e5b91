//! Canned events for `--mock` runs (no Zabbix needed)

use crate::utils::{Event, HostRef};

pub const MOCK_PERIOD: &str = "MOCK DATA";

pub fn mock_events() -> Vec<Event> {
    vec![
        fixture("30001", 1756821453, 4, "High CPU usage > 85% for 5m", "0", "10101", "app-01"),
        fixture("30002", 1756825011, 3, "Average I/O wait > 25%", "1", "10102", "db-01"),
        fixture("30003", 1756828711, 2, "WARNING: Disk /var > 80%", "0", "10103", "lab-01"),
        fixture("30004", 1756832311, 5, "DISASTER: Core link down", "0", "10104", "gw-core"),
        fixture("30005", 1756835911, 2, "WARNING: Memory usage > 90%", "0", "10101", "app-01"),
    ]
}

fn fixture(
    eventid: &str,
    clock: i64,
    severity: i64,
    name: &str,
    acknowledged: &str,
    hostid: &str,
    host: &str,
) -> Event {
    Event {
        eventid: eventid.to_string(),
        clock,
        severity,
        name: name.to_string(),
        acknowledged: acknowledged.to_string(),
        r_eventid: None,
        hosts: vec![HostRef { hostid: hostid.to_string(), host: host.to_string() }],
    }
}
