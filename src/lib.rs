//! Site Payroll Engine
//!
//! This crate turns construction-site attendance shifts into payroll figures.
//! Overtime follows one weekly policy: the first 40 hours an employee works in
//! an ISO week are regular time, everything beyond is overtime. Reports for
//! payroll, weekly, master and per-employee views are built on top of the
//! same pay lines.

#![warn(missing_docs)]

pub mod aggregation;
pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod reports;
pub mod repository;
