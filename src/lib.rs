//! Notion Webhooks - A receiver for Notion webhook deliveries.
//!
//! Deliveries are authenticated with HMAC-SHA256, validated, classified as
//! data-source or legacy events, and appended to an in-memory event log that
//! can be queried over HTTP.

pub mod config;
pub mod event_log;
pub mod ingest;
pub mod server;
pub mod types;
pub mod webhooks;

#[cfg(test)]
mod test_utils;
