//! Core data types for the Conforma structured generation library.
//!
//! This crate provides the foundation data types shared by the engine and by
//! feature crates: generation requests and responses, sampling parameters with
//! their cooling schedule, and the retry policy.

mod observability;
mod request;
mod sampling;

pub use observability::init_tracing;
pub use request::{GenerateRequest, RawResponse};
pub use sampling::{CoolingSchedule, RetryPolicy, SamplingParams};
