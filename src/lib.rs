//! SIR DNI Lookup API Library
//!
//! Validates an 8-digit DNI, queries the SIR lookup site once, and reshapes
//! the answer into a normalized record.
//!
//! # Modules
//!
//! - `api`: Router and handler namespace.
//! - `core`: Validation, normalization and errors.
//! - `integrations`: External service integrations.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `lookup`: DNI validation and record normalization.
//! - `models`: Upstream and API data models.
//! - `sir_client`: Upstream AJAX client.

pub mod api;
pub mod core;
pub mod integrations;

// Re-export primary modules for shared use in tests and the binary
pub mod config;
pub mod errors;
pub mod handlers;
pub mod lookup;
pub mod models;
pub mod sir_client;
