//! fairshare - expense splitting for trips and events
//!
//! Occasions hold people, subgroups, expenses split equally among people, and
//! settlements recording real payments. The settlement engine reduces an
//! occasion to one signed balance per person and suggests a short list of
//! transfers that settles everyone up.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (occasions, people, expenses, settlements)
//! - `engine`: Balance calculation, transfer suggestions and integrity checks
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `reports`: Occasion statistics and per-party summaries
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fairshare::engine::{compute_balances, suggest_transfers};
//!
//! let balances = compute_balances(&people, &expenses, &splits, &settlements);
//! for transfer in suggest_transfers(&balances) {
//!     println!("{}", transfer);
//! }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FairshareError, FairshareResult};
