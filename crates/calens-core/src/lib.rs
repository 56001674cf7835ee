//! Calens Core - Shared foundations for the calens changelog tool
//!
//! This crate provides the error taxonomy and configuration handling used by
//! the changelog library and the command line front end.

pub mod config;
pub mod error;

pub use config::{ChangelogConfig, Config, TrackerConfig};
pub use error::{
    CalensError, ConfigError, EntryError, ReleaseError, RenderError, Result, ValidationError,
};
