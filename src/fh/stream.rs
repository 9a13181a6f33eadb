// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: filehash
// File: stream.rs
// Author: filehash maintainers

//! Sequential, range-limited view over a [`RandomAccessSource`].

use super::error::{HashError, Result};
use super::range::ByteRange;
use super::source::RandomAccessSource;
use std::io::{self, Read};

/// Result of one [`BoundedStream::read_next`] call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReadOutcome {
	/// Bytes written to the front of the caller's buffer.
	pub delivered: usize,
	pub end_of_stream: bool,
}

impl ReadOutcome {
	const fn finished() -> Self {
		Self {
			delivered: 0,
			end_of_stream: true,
		}
	}

	const fn pending() -> Self {
		Self {
			delivered: 0,
			end_of_stream: false,
		}
	}
}

/// Cursor over `source` that never yields a byte outside its range.
///
/// For [`ByteRange::Bounded`] the stream asks the source for at most
/// `end - position` bytes and treats the source running dry before
/// `end` as an error. For [`ByteRange::From`] the source's own end of
/// data terminates the stream normally.
pub struct BoundedStream<S> {
	source: S,
	range: ByteRange,
	position: u64,
}

impl<S: RandomAccessSource> BoundedStream<S> {
	pub fn new(source: S, range: ByteRange) -> Result<Self> {
		range.validate()?;
		Ok(Self {
			source,
			position: range.begin(),
			range,
		})
	}

	pub fn position(&self) -> u64 {
		self.position
	}

	pub fn range(&self) -> ByteRange {
		self.range
	}

	/// Reads the next chunk into the front of `buf`.
	///
	/// `end_of_stream` is set on the call that brings a bounded cursor to
	/// `end`, so the final chunk and the end signal can arrive together.
	pub fn read_next(&mut self, buf: &mut [u8]) -> Result<ReadOutcome> {
		match self.range {
			ByteRange::Bounded { end, .. } => self.read_bounded(buf, end),
			ByteRange::From { .. } => self.read_open(buf),
		}
	}

	fn read_bounded(
		&mut self,
		buf: &mut [u8],
		end: u64,
	) -> Result<ReadOutcome> {
		let remaining = end - self.position;
		if remaining == 0 {
			return Ok(ReadOutcome::finished());
		}
		let want = usize::try_from(remaining)
			.map_or(buf.len(), |remaining| remaining.min(buf.len()));
		if want == 0 {
			return Ok(ReadOutcome::pending());
		}
		let got = self.fill(&mut buf[..want])?;
		if got == 0 {
			return Err(HashError::truncated(self.position, end));
		}
		self.position += got as u64;
		Ok(ReadOutcome {
			delivered: got,
			end_of_stream: self.position == end,
		})
	}

	fn read_open(&mut self, buf: &mut [u8]) -> Result<ReadOutcome> {
		if buf.is_empty() {
			return Ok(ReadOutcome::pending());
		}
		let got = self.fill(buf)?;
		if got == 0 {
			return Ok(ReadOutcome::finished());
		}
		self.position = self
			.position
			.checked_add(got as u64)
			.ok_or_else(|| HashError::SourceRead {
				offset: self.position,
				cause: io::Error::new(
					io::ErrorKind::InvalidData,
					"source offset overflowed u64",
				),
			})?;
		Ok(ReadOutcome {
			delivered: got,
			end_of_stream: false,
		})
	}

	// A source claiming more bytes than it was handed is clamped to the
	// slice length.
	fn fill(&self, buf: &mut [u8]) -> Result<usize> {
		let got = self
			.source
			.read_at(buf, self.position)
			.map_err(|cause| HashError::SourceRead {
				offset: self.position,
				cause,
			})?;
		Ok(got.min(buf.len()))
	}
}

impl<S: RandomAccessSource> Read for BoundedStream<S> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		self.read_next(buf)
			.map(|outcome| outcome.delivered)
			.map_err(|err| match err {
				HashError::SourceRead { cause, .. } => cause,
				other => io::Error::new(io::ErrorKind::Other, other),
			})
	}
}
