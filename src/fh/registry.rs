// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: filehash
// File: registry.rs
// Author: filehash maintainers

//! Name to digest-constructor table, with factory dispatch and metadata
//! helpers shared by the hasher and the CLI.

use super::error::{HashError, Result};
use digest::Digest;
use std::borrow::Cow;
use std::fmt;

/// Incremental digest state: feed bytes, then finalize once.
pub trait DigestAccumulator: Send {
	fn update(&mut self, data: &[u8]);
	fn finalize(self: Box<Self>) -> Vec<u8>;
}

/// Adapts any RustCrypto [`Digest`] into a [`DigestAccumulator`].
pub struct Accumulator<D>(D);

impl<D: Digest + Send> DigestAccumulator for Accumulator<D> {
	fn update(&mut self, data: &[u8]) {
		Digest::update(&mut self.0, data);
	}

	fn finalize(self: Box<Self>) -> Vec<u8> {
		let Accumulator(inner) = *self;
		inner.finalize().to_vec()
	}
}

pub type DigestFactory = fn() -> Box<dyn DigestAccumulator>;

fn boxed<D: Digest + Send + 'static>() -> Box<dyn DigestAccumulator> {
	Box::new(Accumulator(D::new()))
}

/// A named digest constructor. Stateless; every call to
/// [`DigestFunction::accumulator`] yields fresh, independent state.
#[derive(Clone, Copy)]
pub struct DigestFunction {
	name: &'static str,
	output_len: usize,
	factory: DigestFactory,
}

impl DigestFunction {
	pub const fn new(
		name: &'static str,
		output_len: usize,
		factory: DigestFactory,
	) -> Self {
		Self {
			name,
			output_len,
			factory,
		}
	}

	/// Builds the entry for a RustCrypto digest type.
	pub fn of<D: Digest + Send + 'static>(name: &'static str) -> Self {
		Self::new(name, <D as Digest>::output_size(), boxed::<D>)
	}

	pub const fn name(&self) -> &'static str {
		self.name
	}

	/// Digest length in bytes.
	pub fn output_len(&self) -> usize {
		self.output_len
	}

	pub fn accumulator(&self) -> Box<dyn DigestAccumulator> {
		(self.factory)()
	}
}

impl fmt::Debug for DigestFunction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DigestFunction")
			.field("name", &self.name)
			.field("output_len", &self.output_len)
			.finish()
	}
}

pub const MD5: DigestFunction =
	DigestFunction::new("md5", 16, boxed::<md5::Md5>);
pub const SHA1: DigestFunction =
	DigestFunction::new("sha1", 20, boxed::<sha1::Sha1>);
pub const SHA224: DigestFunction =
	DigestFunction::new("sha224", 28, boxed::<sha2::Sha224>);
pub const SHA256: DigestFunction =
	DigestFunction::new("sha256", 32, boxed::<sha2::Sha256>);
pub const SHA384: DigestFunction =
	DigestFunction::new("sha384", 48, boxed::<sha2::Sha384>);
pub const SHA512: DigestFunction =
	DigestFunction::new("sha512", 64, boxed::<sha2::Sha512>);

const BUILTIN: &[DigestFunction] =
	&[MD5, SHA1, SHA224, SHA256, SHA384, SHA512];

const EXTENDED: &[DigestFunction] = &[
	MD5,
	SHA1,
	SHA224,
	SHA256,
	SHA384,
	SHA512,
	DigestFunction::new("sha3-224", 28, boxed::<sha3::Sha3_224>),
	DigestFunction::new("sha3-256", 32, boxed::<sha3::Sha3_256>),
	DigestFunction::new("sha3-384", 48, boxed::<sha3::Sha3_384>),
	DigestFunction::new("sha3-512", 64, boxed::<sha3::Sha3_512>),
	DigestFunction::new("blake2b", 64, boxed::<blake2::Blake2b512>),
	DigestFunction::new("blake2s", 32, boxed::<blake2::Blake2s256>),
];

/// Immutable set of algorithms addressable by exact, case-sensitive name.
#[derive(Clone, Debug)]
pub struct AlgorithmRegistry {
	algorithms: Cow<'static, [DigestFunction]>,
}

impl AlgorithmRegistry {
	/// `md5`, `sha1`, `sha224`, `sha256`, `sha384` and `sha512`.
	pub const fn builtin() -> Self {
		Self {
			algorithms: Cow::Borrowed(BUILTIN),
		}
	}

	/// The builtin set plus SHA-3 and BLAKE2.
	pub const fn extended() -> Self {
		Self {
			algorithms: Cow::Borrowed(EXTENDED),
		}
	}

	pub fn empty() -> Self {
		Self {
			algorithms: Cow::Owned(Vec::new()),
		}
	}

	/// Adds `function`, replacing any entry with the same name.
	pub fn register(mut self, function: DigestFunction) -> Self {
		let algorithms = self.algorithms.to_mut();
		match algorithms.iter_mut().find(|f| f.name == function.name) {
			Some(slot) => *slot = function,
			None => algorithms.push(function),
		}
		self
	}

	pub fn lookup(&self, name: &str) -> Result<DigestFunction> {
		self.algorithms
			.iter()
			.find(|f| f.name == name)
			.copied()
			.ok_or_else(|| HashError::not_supported(name, self.names()))
	}

	pub fn contains(&self, name: &str) -> bool {
		self.algorithms.iter().any(|f| f.name == name)
	}

	/// Registered names in registration order.
	pub fn names(&self) -> Vec<&'static str> {
		self.algorithms.iter().map(|f| f.name).collect()
	}

	pub fn algorithms(&self) -> impl Iterator<Item = &DigestFunction> {
		self.algorithms.iter()
	}
}

impl Default for AlgorithmRegistry {
	fn default() -> Self {
		Self::builtin()
	}
}
