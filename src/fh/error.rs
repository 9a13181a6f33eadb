// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: filehash
// File: error.rs
// Author: filehash maintainers

//! Error type shared by the registry, the bounded stream and the hasher.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Reasons a digest could not be computed.
///
/// A returned error always means "no digest", never "digest over a
/// partial range".
#[derive(Debug)]
pub enum HashError {
	/// The requested name is not present in the registry.
	AlgorithmNotSupported {
		requested: String,
		supported: Vec<&'static str>,
	},
	/// Reading from the source failed at `offset`. Running out of
	/// data before the end of a bounded range lands here too, with an
	/// [`io::ErrorKind::UnexpectedEof`] cause.
	SourceRead { offset: u64, cause: io::Error },
	/// `begin` lies after `end`.
	InvalidRange { begin: u64, end: u64 },
	/// The path helper could not open its file.
	Open { path: PathBuf, cause: io::Error },
}

impl HashError {
	pub(crate) fn not_supported(
		requested: &str,
		supported: Vec<&'static str>,
	) -> Self {
		Self::AlgorithmNotSupported {
			requested: requested.to_string(),
			supported,
		}
	}

	pub(crate) fn truncated(offset: u64, end: u64) -> Self {
		Self::SourceRead {
			offset,
			cause: io::Error::new(
				io::ErrorKind::UnexpectedEof,
				format!(
					"source ended at offset {} before range end {}",
					offset, end
				),
			),
		}
	}

	/// True when the failure came from resolving the algorithm name.
	pub fn is_algorithm_error(&self) -> bool {
		matches!(self, Self::AlgorithmNotSupported { .. })
	}

	/// True when the failure came from reading the source.
	pub fn is_source_error(&self) -> bool {
		matches!(self, Self::SourceRead { .. } | Self::Open { .. })
	}

	/// Offset of the failing read, if any.
	pub fn offset(&self) -> Option<u64> {
		match self {
			Self::SourceRead { offset, .. } => Some(*offset),
			_ => None,
		}
	}
}

impl fmt::Display for HashError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::AlgorithmNotSupported {
				requested,
				supported,
			} => write!(
				f,
				"unsupported hash algorithm `{}`, expected one of ({})",
				requested,
				supported.join(", ")
			),
			Self::SourceRead { offset, cause } => write!(
				f,
				"could not read source at offset {}: {}",
				offset, cause
			),
			Self::InvalidRange { begin, end } => write!(
				f,
				"invalid byte range: begin {} is after end {}",
				begin, end
			),
			Self::Open { path, cause } => write!(
				f,
				"could not open {}: {}",
				path.display(),
				cause
			),
		}
	}
}

impl std::error::Error for HashError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::SourceRead { cause, .. } | Self::Open { cause, .. } => {
				Some(cause)
			}
			_ => None,
		}
	}
}

pub type Result<T> = std::result::Result<T, HashError>;
