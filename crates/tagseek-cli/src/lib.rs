//! tagseek CLI - offline helpers for the experiment bucketing.
//!
//! - tagseek-audit bucket: bucket and membership for a list of ids
//! - tagseek-audit hash: raw MurmurHash3 output

pub mod audit;

pub use audit::{audit_ids, AuditRow};
