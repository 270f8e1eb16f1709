#![forbid(unsafe_code)]

//! Core domain model and calculations for anthropometric risk indices.
//!
//! This crate provides:
//! - Domain types (measurements, categories, risk flags, results)
//! - Index calculator (BMI, waist-hip ratio, waist-to-height ratio)
//! - Presentation adapter (display lines with severity tiers)
//! - Result notification hook
//! - CSV and JSON export

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod calculator;
pub mod presentation;
pub mod notify;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use calculator::{calculate, calculate_strict, calculate_with};
pub use presentation::{display_lines, render_text, DisplayLine};
pub use notify::{ResultHub, ResultObserver};
