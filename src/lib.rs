pub mod application;
pub mod domain;
pub mod infra;

pub use application::compare::{compute_diff, compute_diff_with, render};
