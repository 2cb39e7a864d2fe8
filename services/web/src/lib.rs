//! services/web/src/lib.rs
//!
//! Library half of the web service; the binaries in `src/bin` build on it.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
