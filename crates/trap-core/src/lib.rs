//! # trap-core
//!
//! Core types and error types for Trapline.
//!
//! This crate provides the foundational types shared across all Trapline crates:
//! - Typed records for the two upstream collections (traps, samplings) and
//!   the analyses/results nested inside samplings
//! - Record identifiers as delivered by the inventory API
//! - Query targets, time ranges and the invocation request
//! - Output fields and frames returned by an invocation
//! - Variable-listing and health-check response types
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod target;

pub use entities::{Analysis, RecordId, Sampling, Trap, TrapProjection};
pub use enums::{FieldType, QueryType, VariableQuery};
pub use errors::CoreError;
pub use responses::{DataFrame, Field, HealthStatus, MetricFindValue, QueryResponse};
pub use target::{QueryRequest, QueryTarget, TimeRange};
