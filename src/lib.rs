//! Scrapeforged - Metadata scraper registry and dispatch
//!
//! This library crate exposes the core functionality for integration testing.

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod reconcile;
pub mod scraper;
pub mod server;
