//! Configuration module for fairshare
//!
//! This module provides configuration management including:
//! - platform path resolution
//! - user settings persistence

pub mod paths;
pub mod settings;

pub use paths::FairsharePaths;
pub use settings::Settings;
