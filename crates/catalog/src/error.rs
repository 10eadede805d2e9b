//! Error types for the catalog collaborators.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of the remote catalog or category collaborator.
///
/// Any of these leaves the catalog view in its unavailable state. Selections
/// built from earlier loads are unaffected.
#[derive(Debug, Error)]
pub enum SourceError {
	/// The collaborator could not be reached or refused the request.
	#[error("catalog unavailable: {0}")]
	Unavailable(String),

	/// The collaborator answered with a payload that does not decode.
	#[error("catalog payload could not be decoded: {0}")]
	Decode(#[from] serde_json::Error),

	/// A catalog snapshot file could not be read.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the snapshot that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// An identifier string that is not a non-negative integer.
#[derive(Debug, Error)]
#[error("invalid identifier {input:?}: {source}")]
pub struct ParseIdError {
	/// The rejected input, trimmed.
	pub input: String,
	/// The underlying integer parse failure.
	#[source]
	pub source: ParseIntError,
}
