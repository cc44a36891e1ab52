//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `transaction` - Income/expense records, validation, filters and CSV export
//! - `summary` - Period totals, trends, rankings and insights
//! - `budget` - Budget goals and budget-versus-actual progress
//! - `cache` - Per-user response cache with invalidate-on-write
//! - `auth` - Password hashing and registration rules

pub mod auth;
pub mod budget;
pub mod cache;
pub mod summary;
pub mod transaction;
