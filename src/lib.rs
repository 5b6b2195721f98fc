//! maintlog - Maintenance report history with durable local storage
//!
//! maintlog keeps the history of maintenance reports written on the shop
//! floor. Reports are persisted to a key-value store after every change, and
//! deleted reports are remembered so that a later sync from the work-order
//! board cannot bring them back.
//!
//! # Architecture
//!
//! - **history**: The report store (add, status, search, delete, tombstones)
//! - **report**: Report data model and identifiers
//! - **storage**: Key-value persistence (files on disk, in-memory)
//! - **integrations**: Work-order board adapter
//! - **config**: Configuration file and validation
//! - **render**: Terminal output and notifications
//! - **app**: Controller used by the CLI

// Core modules
pub mod config;
pub mod error;
pub mod history;
pub mod report;
pub mod storage;

// Components
pub mod app;
pub mod integrations;
pub mod logging;
pub mod render;
pub mod style;

// Re-exports
pub use error::{MaintlogError, Result};
