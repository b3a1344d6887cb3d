//! Infrastructure adapters. Implement ports.
//!
//! HTTP provider endpoints, key-value persistence, terminal UI.

pub mod http;
pub mod persistence;
pub mod ui;
