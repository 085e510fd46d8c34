//! Developer Tooling: read-only session inspection.

mod inspector;

pub use inspector::{SessionInspector, SessionSummary, TargetInfo};
