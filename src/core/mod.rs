//! Shared primitives: configuration, errors, output and time helpers.

pub mod config;
pub mod error;
pub mod output;
pub mod time;
