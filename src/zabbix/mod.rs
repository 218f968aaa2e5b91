pub mod client;
pub mod transport;

pub use client::{ZabbixClient, PROBLEM_EVENTS};
pub use transport::{HttpTransport, Transport};
