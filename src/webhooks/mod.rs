//! Webhook handling for Notion events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Typed event definitions and payload parsing
//! - Taxonomy classification (data source vs. legacy events)

pub mod classify;
pub mod events;
pub mod parser;
pub mod signature;

pub use classify::{
    Classification, Classifier, ClassifyError, EventClassifier, classify_event,
    is_data_source_event, is_legacy_event,
};
pub use events::{EventData, EventFamily, EventType, ParentRef, WebhookEvent};
pub use parser::{ParseError, parse_event};
pub use signature::{
    WebhookSecret, compute_signature, format_signature_header, parse_signature_header,
    verify_signature,
};
