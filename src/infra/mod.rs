//! Infrastructure layer (adapters/implementations).
//!
//! Configuration, input acquisition and other IO-facing helpers.

pub mod app_config;
pub mod cli;
pub mod hash;
pub mod language;
