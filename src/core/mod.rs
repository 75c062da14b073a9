//! Core library components.
//!
//! This module contains the resolution engine: matching variables to
//! parameter names, batching, fetching and substituting.

pub mod batch;
pub mod binding;
pub mod config;
pub mod constants;
pub mod engine;
pub mod environ;
pub mod launch;
pub mod matcher;
pub mod resolver;
pub mod store;
pub mod substitute;
pub mod template;
pub mod types;
