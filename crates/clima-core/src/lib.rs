//! Core types and trait definitions for the clima weather store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod city;
pub mod country;
pub mod error;
pub mod query;
pub mod store;
pub mod temperature;
pub mod validate;

pub use error::{Error, Result};
