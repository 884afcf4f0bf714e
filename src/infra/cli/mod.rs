//! CLI infrastructure for codeshift.
//!
//! Reads comparison inputs from files, stdin and JSON change documents.

pub mod input;
