//! CreatorFlow - campaign and project budgeting for creator teams
//!
//! This library provides the core functionality behind the `creatorflow`
//! binary: an influencer roster with delivery, spend and task tracking, and
//! budgeted projects whose expense lines can be rendered as invoices.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (projects, influencers, deliveries, tasks, etc.)
//! - `storage`: JSON collection storage with change subscriptions
//! - `services`: Business logic layer
//! - `console`: Projections, selections and the signed-in session
//! - `audit`: Audit logging system
//! - `reports`: Dashboard and portfolio summaries
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use creatorflow::config::{paths::CreatorFlowPaths, settings::Settings};
//! use creatorflow::console::Console;
//!
//! let paths = CreatorFlowPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let console = Console::open(paths, settings)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::CreatorFlowError;
