//! Core identifier types shared by the webhook and log modules.

pub mod ids;

pub use ids::{DataSourceId, EventId, ObjectId, WorkspaceId};
