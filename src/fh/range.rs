// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: filehash
// File: range.rs
// Author: filehash maintainers

use super::error::{HashError, Result};

/// Byte range of a source to digest.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ByteRange {
	/// Half-open `[begin, end)`. The source must hold every byte of it.
	Bounded { begin: u64, end: u64 },
	/// Everything from `begin` up to the source's own end of data.
	From { begin: u64 },
}

impl ByteRange {
	/// Bounded range, rejecting `begin > end`.
	pub fn new(begin: u64, end: u64) -> Result<Self> {
		if begin > end {
			return Err(HashError::InvalidRange { begin, end });
		}
		Ok(Self::Bounded { begin, end })
	}

	pub const fn starting_at(begin: u64) -> Self {
		Self::From { begin }
	}

	/// The whole source, starting at offset zero.
	pub const fn whole() -> Self {
		Self::From { begin: 0 }
	}

	pub const fn begin(&self) -> u64 {
		match *self {
			Self::Bounded { begin, .. } | Self::From { begin } => begin,
		}
	}

	pub const fn end(&self) -> Option<u64> {
		match *self {
			Self::Bounded { end, .. } => Some(end),
			Self::From { .. } => None,
		}
	}

	/// Number of bytes covered, when bounded.
	pub fn len(&self) -> Option<u64> {
		match *self {
			Self::Bounded { begin, end } => Some(end.saturating_sub(begin)),
			Self::From { .. } => None,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == Some(0)
	}

	pub(crate) fn validate(&self) -> Result<()> {
		match *self {
			Self::Bounded { begin, end } if begin > end => {
				Err(HashError::InvalidRange { begin, end })
			}
			_ => Ok(()),
		}
	}
}

impl Default for ByteRange {
	fn default() -> Self {
		Self::whole()
	}
}
