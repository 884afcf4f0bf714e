//! Domain types for codeshift.
//! Defines the comparison records, views and errors shared by every layer.

pub mod change;
pub mod diff;
pub mod error;

pub use change::*;
pub use diff::*;
pub use error::*;
