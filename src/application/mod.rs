//! Application layer (use-cases, policies).
//!
//! Orchestrates the comparison pipeline without depending on any particular
//! presentation surface.

pub mod compare;
