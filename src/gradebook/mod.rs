//! Student gradebook analysis.
//!
//! Marks are collected by hand or from a CSV file, summarised with
//! descriptive statistics, graded A–F and split into pass/fail lists.

pub mod filter;
pub mod grade;
pub mod import;
pub mod report;
pub mod session;
