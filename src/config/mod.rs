//! MEM Configuration Module
//!
//! Physical constants and method defaults loaded from TOML, replacing the
//! literals the pipeline stages would otherwise embed.
//!
//! ## Loading Order
//!
//! 1. `MEM_CONFIG` environment variable (path to TOML file)
//! 2. `mem_config.toml` in the current working directory
//! 3. Built-in defaults (the reference constants)
//!
//! The loaded `MemConfig` is handed to `MemPipeline::new` and passed down to
//! every stage explicitly, so a run depends only on its inputs and config.

mod mem_config;
pub mod defaults;
pub mod validation;

pub use mem_config::*;
