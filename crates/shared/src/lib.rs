//! Shared types, errors, and configuration for Nexus Reports.
//!
//! This crate provides common types used across all other crates:
//! - Subjects (companies/deals) that reports are generated for
//! - Typed IDs for generated report records
//! - Amount formatting helpers for financial figures
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, BrandingConfig, ReportsConfig};
pub use error::{AppError, AppResult};
