//! Intéressement (profit-sharing) estimator.
//!
//! This crate computes a gross and net profit-sharing estimate from a monthly
//! salary, an absence count and an optional entry date, using the fixed
//! constants of a reference year. It also ships the small web front-end that
//! collects those inputs.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
