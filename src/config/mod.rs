//! Configuration module for Wavefront
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and layering command-line overrides on top of them.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use wavefront::config::load_config;
//!
//! let config = load_config(Path::new("wavefront.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, ConfigOverrides, CrawlerConfig, RobotsFallback, UserAgentConfig};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, validate_seed};
