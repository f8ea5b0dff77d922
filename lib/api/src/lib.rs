//! HTTP surface for LoanScope.
//!
//! All routes are read-only views over a shared [`loanscope_storage::ScoringEngine`].

pub mod rest;

pub use rest::{configure, RestApi};
