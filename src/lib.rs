//! Statutory Deduction Engine for multi-country payroll
//!
//! This crate computes statutory payroll deductions (income tax, social
//! security and similar contributions) with cumulative year-to-date
//! awareness: progressive rate bands, annual caps, off-cycle top-up
//! calculations, mid-year refunds, and tax relief schemes.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod repository;
