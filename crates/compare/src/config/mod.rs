//! Comparison engine configuration, read from TOML.
//!
//! ```toml
//! [matrix]
//! attribute_matching = "exact"   # or "normalized"
//!
//! [catalog]
//! scoped_fetch = true
//! max_pages = 50
//!
//! [deep_link]
//! param = "add"
//! notify_missing = false
//! ```
//!
//! Every section and key is optional; omitted values take the defaults above.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use vitrin_catalog::ViewOptions;

use crate::matrix::AttributeMatching;


/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML or an unknown key.
	#[error("config parse error: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
	/// Matrix construction.
	pub matrix: MatrixConfig,
	/// Catalog fetching.
	pub catalog: ViewOptions,
	/// Deep-link intake.
	pub deep_link: DeepLinkConfig,
}

/// Matrix construction options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatrixConfig {
	/// How attribute names are matched into rows.
	pub attribute_matching: AttributeMatching,
}

/// Deep-link intake options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeepLinkConfig {
	/// Entry-point parameter carrying the item id.
	pub param: String,
	/// Surface a notice when the linked item is not in the catalog.
	pub notify_missing: bool,
}

impl Default for DeepLinkConfig {
	fn default() -> Self {
		Self {
			param: "add".to_string(),
			notify_missing: false,
		}
	}
}

impl CompareConfig {
	/// Parses a TOML string.
	pub fn parse(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Loads configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&content)
	}
}
