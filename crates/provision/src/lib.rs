//! Scheduled-invocation provisioning model.
//!
//! This crate provides:
//! - YAML spec documents with serde deserialization (`schema`)
//! - Time-rule resolution: local wall-clock time + UTC offset → UTC cron (`resolver`)
//! - Trigger binding with deterministic rule naming and eager duplicate
//!   detection against a caller-owned registry (`binder`)
//! - Least-privilege invoke grants scoped to the originating rule (`grantor`)
//! - A batch pipeline with per-spec failure reporting (`pipeline`)
//! - Output descriptors for the scheduling service (`descriptor`)

pub mod binder;
pub mod descriptor;
pub mod error;
pub mod grantor;
pub mod loader;
pub mod pipeline;
pub mod resolver;
pub mod schema;
pub mod validation;
