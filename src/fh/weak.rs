// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: filehash
// Module: weak algorithm warnings helper
// Author: filehash maintainers

//! Security advisories for registry algorithms that should not be picked
//! for new integrity data. The CLI prints one before hashing.

use super::registry::{DigestFunction, MD5, SHA1, SHA224};
use colored::Colorize;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Weakness {
	/// Practical collision attacks are published.
	Broken,
	/// No known break, but only a 112-bit collision security level.
	ReducedMargin,
}

#[derive(Clone, Copy, Debug)]
pub struct Advisory {
	pub function: DigestFunction,
	pub weakness: Weakness,
	pub replacement: &'static str,
}

impl Advisory {
	pub fn message(&self) -> String {
		let name = self.function.name();
		match self.weakness {
			Weakness::Broken => format!(
				"warning: {} is a weak algorithm, practical collisions are known. Use {} instead.",
				name, self.replacement
			),
			Weakness::ReducedMargin => format!(
				"note: {} has a reduced security margin (112-bit collision resistance). Prefer {} for new digests.",
				name, self.replacement
			),
		}
	}
}

const ADVISORIES: &[Advisory] = &[
	Advisory {
		function: MD5,
		weakness: Weakness::Broken,
		replacement: "sha256 or sha512",
	},
	Advisory {
		function: SHA1,
		weakness: Weakness::Broken,
		replacement: "sha256 or sha512",
	},
	Advisory {
		function: SHA224,
		weakness: Weakness::ReducedMargin,
		replacement: "sha256",
	},
];

/// Advisory for the algorithm a registry lookup resolved to, if any.
pub fn advisory_for(function: &DigestFunction) -> Option<&'static Advisory> {
	ADVISORIES
		.iter()
		.find(|advisory| advisory.function.name() == function.name())
}

pub fn advisories() -> &'static [Advisory] {
	ADVISORIES
}

/// Prints `advisory` to stderr. `colored` drops the ANSI codes when
/// `NO_COLOR` is set.
pub fn emit(advisory: &Advisory) {
	let message = advisory.message();
	match advisory.weakness {
		Weakness::Broken => eprintln!("{}", message.yellow().bold()),
		Weakness::ReducedMargin => eprintln!("{}", message.cyan()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fh::registry::AlgorithmRegistry;

	#[test]
	fn advisories_by_weakness() {
		let registry = AlgorithmRegistry::builtin();
		let weakness = |name: &str| {
			advisory_for(&registry.lookup(name).unwrap()).map(|a| a.weakness)
		};
		assert_eq!(weakness("md5"), Some(Weakness::Broken));
		assert_eq!(weakness("sha1"), Some(Weakness::Broken));
		assert_eq!(weakness("sha224"), Some(Weakness::ReducedMargin));
		assert_eq!(weakness("sha256"), None);
		assert_eq!(weakness("sha512"), None);
	}

	#[test]
	fn sha224_is_not_reported_as_broken() {
		let advisory = advisory_for(&SHA224).expect("sha224 advisory");
		let message = advisory.message();
		assert!(message.starts_with("note: sha224"));
		assert!(!message.contains("collisions are known"));
		assert!(!message.contains("weak algorithm"));
	}

	#[test]
	fn broken_message_names_replacement() {
		let message = advisory_for(&MD5).unwrap().message();
		assert!(message.contains("md5 is a weak algorithm"));
		assert!(message.contains("sha256 or sha512"));
	}

	#[test]
	fn every_advisory_names_a_builtin_algorithm() {
		let registry = AlgorithmRegistry::builtin();
		for advisory in advisories() {
			assert!(registry.contains(advisory.function.name()));
		}
	}
}
