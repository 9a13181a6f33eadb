// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: filehash
// File: hasher.rs
// Author: filehash maintainers

//! Pumps a bounded stream into a digest accumulator.
//!
//! Every call builds its own stream, accumulator and transfer buffer, so
//! one [`Hasher`] can serve any number of threads at once.

use super::error::{HashError, Result};
use super::range::ByteRange;
use super::registry::{AlgorithmRegistry, DigestFunction, SHA1};
use super::source::RandomAccessSource;
use super::stream::BoundedStream;
use std::fs::File;
use std::path::Path;

pub const DEFAULT_BUFFER_SIZE: usize = 8192;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HasherConfig {
	/// Size of the transfer buffer. Zero is bumped to one.
	pub buffer_size: usize,
}

impl Default for HasherConfig {
	fn default() -> Self {
		Self {
			buffer_size: DEFAULT_BUFFER_SIZE,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct Hasher {
	registry: AlgorithmRegistry,
	config: HasherConfig,
}

impl Hasher {
	pub fn new(registry: AlgorithmRegistry, config: HasherConfig) -> Self {
		Self {
			registry,
			config: HasherConfig {
				buffer_size: config.buffer_size.max(1),
			},
		}
	}

	pub fn with_registry(registry: AlgorithmRegistry) -> Self {
		Self::new(registry, HasherConfig::default())
	}

	pub fn registry(&self) -> &AlgorithmRegistry {
		&self.registry
	}

	pub fn config(&self) -> HasherConfig {
		self.config
	}

	/// Digest of `range` of `source` using `function`.
	pub fn compute<S: RandomAccessSource>(
		&self,
		function: &DigestFunction,
		source: S,
		range: ByteRange,
	) -> Result<Vec<u8>> {
		let mut stream = BoundedStream::new(source, range)?;
		let mut accumulator = function.accumulator();
		let mut buffer = vec![0u8; self.buffer_len(range)];
		loop {
			let outcome = stream.read_next(&mut buffer)?;
			if outcome.delivered > 0 {
				accumulator.update(&buffer[..outcome.delivered]);
			}
			if outcome.end_of_stream {
				break;
			}
		}
		Ok(accumulator.finalize())
	}

	/// Resolves `name` in the registry, then behaves like [`Hasher::compute`].
	pub fn compute_by_name<S: RandomAccessSource>(
		&self,
		name: &str,
		source: S,
		range: ByteRange,
	) -> Result<Vec<u8>> {
		let function = self.registry.lookup(name)?;
		self.compute(&function, source, range)
	}

	/// Digest of everything from offset zero to the source's end of data.
	pub fn compute_whole_source<S: RandomAccessSource>(
		&self,
		function: &DigestFunction,
		source: S,
	) -> Result<Vec<u8>> {
		self.compute(function, source, ByteRange::whole())
	}

	pub fn compute_whole_source_by_name<S: RandomAccessSource>(
		&self,
		name: &str,
		source: S,
	) -> Result<Vec<u8>> {
		self.compute_by_name(name, source, ByteRange::whole())
	}

	/// Opens `path` read-only and digests `range` of it.
	pub fn compute_path<P: AsRef<Path>>(
		&self,
		name: &str,
		path: P,
		range: ByteRange,
	) -> Result<Vec<u8>> {
		let function = self.registry.lookup(name)?;
		let path = path.as_ref();
		let file = File::open(path).map_err(|cause| HashError::Open {
			path: path.to_path_buf(),
			cause,
		})?;
		self.compute(&function, &file, range)
	}

	// Small bounded ranges do not need a full-size buffer.
	fn buffer_len(&self, range: ByteRange) -> usize {
		match range.len() {
			Some(len) => usize::try_from(len)
				.map_or(self.config.buffer_size, |len| {
					len.clamp(1, self.config.buffer_size)
				}),
			None => self.config.buffer_size,
		}
	}
}

/// Digest of `[begin, end)` of `source`.
pub fn hash<S: RandomAccessSource>(
	function: &DigestFunction,
	source: S,
	begin: u64,
	end: u64,
) -> Result<Vec<u8>> {
	Hasher::default().compute(function, source, ByteRange::new(begin, end)?)
}

/// Digest of `[begin, end)` of `source` with a builtin algorithm name.
pub fn hash_by_name<S: RandomAccessSource>(
	name: &str,
	source: S,
	begin: u64,
	end: u64,
) -> Result<Vec<u8>> {
	Hasher::default().compute_by_name(name, source, ByteRange::new(begin, end)?)
}

pub fn hash_whole<S: RandomAccessSource>(
	function: &DigestFunction,
	source: S,
) -> Result<Vec<u8>> {
	Hasher::default().compute_whole_source(function, source)
}

pub fn hash_whole_by_name<S: RandomAccessSource>(
	name: &str,
	source: S,
) -> Result<Vec<u8>> {
	Hasher::default().compute_whole_source_by_name(name, source)
}

/// SHA-1 of `[begin, end)`.
pub fn sha1_range<S: RandomAccessSource>(
	source: S,
	begin: u64,
	end: u64,
) -> Result<Vec<u8>> {
	hash(&SHA1, source, begin, end)
}

/// SHA-1 of the whole source.
pub fn sha1_whole<S: RandomAccessSource>(source: S) -> Result<Vec<u8>> {
	hash_whole(&SHA1, source)
}

/// Digest of `range` of the file at `path`, by builtin algorithm name.
pub fn hash_path<P: AsRef<Path>>(
	name: &str,
	path: P,
	range: ByteRange,
) -> Result<Vec<u8>> {
	Hasher::default().compute_path(name, path, range)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fh::registry::{MD5, SHA256};
	use hex_literal::hex;
	use std::io;

	const DATA: &[u8] = b"hello world";

	#[test]
	fn sub_ranges_hash_only_their_bytes() {
		assert_eq!(
			sha1_range(DATA, 0, 5).unwrap(),
			hex!("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d")
		);
		assert_eq!(
			sha1_range(DATA, 6, 11).unwrap(),
			hex!("7c211433f02071597741e6ff5a8ea34789abbf43")
		);
	}

	#[test]
	fn empty_range_is_digest_of_nothing() {
		assert_eq!(
			sha1_range(DATA, 5, 5).unwrap(),
			hex!("da39a3ee5e6b4b0d3255bfef95601890afd80709")
		);
		assert_eq!(
			hash(&MD5, DATA, 0, 0).unwrap(),
			hex!("d41d8cd98f00b204e9800998ecf8427e")
		);
	}

	#[test]
	fn whole_source_matches_full_bounded_range() {
		let whole = hash_whole(&SHA256, DATA).unwrap();
		assert_eq!(whole, hash(&SHA256, DATA, 0, 11).unwrap());
		assert_eq!(
			whole,
			hex!("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9")
		);
		assert_eq!(sha1_whole(DATA).unwrap(), sha1_range(DATA, 0, 11).unwrap());
	}

	#[test]
	fn tiny_buffer_gives_same_digest() {
		let hasher = Hasher::new(
			AlgorithmRegistry::builtin(),
			HasherConfig { buffer_size: 0 },
		);
		assert_eq!(hasher.config().buffer_size, 1);
		assert_eq!(
			hasher
				.compute_by_name("sha256", DATA, ByteRange::new(0, 11).unwrap())
				.unwrap(),
			hash_whole_by_name("sha256", DATA).unwrap()
		);
	}

	#[test]
	fn unknown_name_is_an_algorithm_error() {
		let err = hash_by_name("bogus", DATA, 0, 11).unwrap_err();
		assert!(err.is_algorithm_error());
	}

	#[test]
	fn range_past_end_is_a_source_error() {
		let err = hash_by_name("sha1", DATA, 4, 12).unwrap_err();
		assert!(err.is_source_error());
		assert_eq!(err.offset(), Some(11));
	}

	#[test]
	fn inverted_range_is_rejected() {
		assert!(matches!(
			sha1_range(DATA, 6, 5),
			Err(HashError::InvalidRange { begin: 6, end: 5 })
		));
	}

	#[test]
	fn missing_path_reports_open_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = hash_path("sha1", dir.path().join("absent"), ByteRange::whole())
			.unwrap_err();
		match err {
			HashError::Open { cause, .. } => {
				assert_eq!(cause.kind(), io::ErrorKind::NotFound)
			}
			other => panic!("unexpected error {other:?}"),
		}
	}
}
