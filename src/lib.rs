// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: filehash
// File: lib.rs
// Author: filehash maintainers

//! Ranged, streaming digests over random-access sources.
//!
//! ```
//! use filehash::fh::hasher::{hash_by_name, sha1_range};
//!
//! let data: &[u8] = b"hello world";
//! let hello = sha1_range(data, 0, 5).unwrap();
//! assert_eq!(hex::encode(hello), "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
//! assert!(hash_by_name("bogus", data, 0, 11).is_err());
//! ```

pub mod fh {
	pub mod app;
	pub mod error;
	pub mod hasher;
	#[cfg(unix)]
	pub mod interrupt;
	pub mod range;
	pub mod realip;
	pub mod registry;
	pub mod source;
	pub mod stream;
	pub mod weak;
}

pub use fh::error::{HashError, Result};
pub use fh::hasher::{
	hash, hash_by_name, hash_path, hash_whole, hash_whole_by_name,
	sha1_range, sha1_whole, Hasher, HasherConfig,
};
pub use fh::range::ByteRange;
pub use fh::registry::{
	AlgorithmRegistry, DigestAccumulator, DigestFunction,
};
pub use fh::source::RandomAccessSource;
pub use fh::stream::{BoundedStream, ReadOutcome};
