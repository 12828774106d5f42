//! Endpoint adjustment engine for straight reinforcement bars.
//!
//! Bars are cached as two endpoints and a unit direction in an
//! [`EndpointIndex`](index::EndpointIndex). Operations read and update that
//! cache and push every geometry edit to the host through
//! [`ModelStore`](host::ModelStore).

pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod index;
pub mod math;
pub mod operations;
pub mod session;

pub use error::{RebarError, Result};
