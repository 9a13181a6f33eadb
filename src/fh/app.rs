// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: filehash
// File: app.rs
// Author: filehash maintainers

use crate::fh::hasher::{Hasher, HasherConfig, DEFAULT_BUFFER_SIZE};
use crate::fh::range::ByteRange;
use crate::fh::realip::{self, AddressFamily};
use crate::fh::registry::AlgorithmRegistry;
use crate::fh::weak;
use clap::{crate_name, Arg, ArgAction};
use clap_complete::{generate, Shell};
use std::error::Error;
use std::io;
use std::path::Path;
use std::time::Duration;

const HELP_TEMPLATE: &str = "{before-help}{name} {version}
{about-with-newline}
Primary commands:
  fhash digest -a <algorithm> [--begin N] [--end N] <FILE>...
  fhash algorithms [--extended]
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(clap::ValueEnum, Debug, Copy, Clone, Eq, PartialEq)]
pub enum OutputOptions {
	Hex,
	Base64,
	HexBase64,
}

impl std::fmt::Display for OutputOptions {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		write!(f, "{:?}", self)
	}
}

/// Renders one output line for `digest` of `path`.
pub fn format_digest(
	digest: &[u8],
	path: &str,
	output: OutputOptions,
	hash_only: bool,
) -> String {
	let encoded = match output {
		OutputOptions::Hex => hex::encode(digest),
		OutputOptions::Base64 => base64::encode(digest),
		OutputOptions::HexBase64 => format!(
			"{} {}",
			hex::encode(digest),
			base64::encode(digest)
		),
	};
	if hash_only {
		encoded
	} else {
		format!("{} {}", encoded, path)
	}
}

fn registry_for(extended: bool) -> AlgorithmRegistry {
	if extended {
		AlgorithmRegistry::extended()
	} else {
		AlgorithmRegistry::builtin()
	}
}

pub fn build_cli() -> clap::Command {
	clap::Command::new(crate_name!())
		.color(clap::ColorChoice::Never)
		.help_template(HELP_TEMPLATE)
		.bin_name("fhash")
		.version(clap::crate_version!())
		.about("Digest whole files or byte ranges of files")
		.subcommand_required(true)
		.arg_required_else_help(true)
		.subcommand(
			clap::Command::new("digest")
				.about("Hash a byte range of one or more files")
				.arg(
					Arg::new("algorithm")
						.short('a')
						.long("algorithm")
						.help("Digest algorithm name (e.g., sha256)")
						.required(true),
				)
				.arg(
					Arg::new("begin")
						.short('b')
						.long("begin")
						.value_parser(clap::value_parser!(u64))
						.help("First byte offset to hash")
						.default_value("0"),
				)
				.arg(
					Arg::new("end")
						.short('e')
						.long("end")
						.value_parser(clap::value_parser!(u64))
						.help("Offset one past the last byte; omit to hash to end of file"),
				)
				.arg(
					Arg::new("output")
						.short('o')
						.long("output")
						.value_parser(clap::value_parser!(OutputOptions))
						.help("Output format (hex, base64, hex-base64)")
						.default_value("hex"),
				)
				.arg(
					Arg::new("hash-only")
						.long("hash-only")
						.action(ArgAction::SetTrue)
						.help("Print only the digest"),
				)
				.arg(
					Arg::new("extended")
						.long("extended")
						.action(ArgAction::SetTrue)
						.help("Enable SHA-3 and BLAKE2 algorithms"),
				)
				.arg(
					Arg::new("buffer-size")
						.long("buffer-size")
						.value_parser(clap::value_parser!(usize))
						.help("Transfer buffer size in bytes")
						.default_value("8192"),
				)
				.arg(
					Arg::new("FILE")
						.required(true)
						.action(ArgAction::Append),
				),
		)
		.subcommand(
			clap::Command::new("algorithms")
				.about("List supported algorithm names")
				.arg(
					Arg::new("extended")
						.long("extended")
						.action(ArgAction::SetTrue)
						.help("Include SHA-3 and BLAKE2"),
				),
		)
		.subcommand(
			clap::Command::new("realip")
				.about("Print this host's public IP address")
				.arg(
					Arg::new("family")
						.short('f')
						.long("family")
						.value_parser(["4", "6"])
						.default_value("4"),
				)
				.arg(
					Arg::new("timeout")
						.short('t')
						.long("timeout")
						.value_parser(clap::value_parser!(u64))
						.help("Request timeout in seconds")
						.default_value("20"),
				),
		)
		.subcommand(
			clap::Command::new("completions")
				.about("Generate shell completions")
				.arg(
					Arg::new("shell")
						.required(true)
						.value_parser(clap::value_parser!(Shell)),
				),
		)
}

fn handle_digest_command(
	args: &clap::ArgMatches,
) -> Result<(), Box<dyn Error>> {
	let algorithm = args
		.get_one::<String>("algorithm")
		.expect("algorithm must be provided");
	let begin = args.get_one::<u64>("begin").copied().unwrap_or(0);
	let range = match args.get_one::<u64>("end") {
		Some(&end) => ByteRange::new(begin, end)?,
		None => ByteRange::starting_at(begin),
	};
	let output = args
		.get_one::<OutputOptions>("output")
		.copied()
		.unwrap_or(OutputOptions::Hex);
	let hash_only = args.get_flag("hash-only");
	let buffer_size = args
		.get_one::<usize>("buffer-size")
		.copied()
		.unwrap_or(DEFAULT_BUFFER_SIZE);
	let hasher = Hasher::new(
		registry_for(args.get_flag("extended")),
		HasherConfig { buffer_size },
	);
	let function = hasher.registry().lookup(algorithm)?;
	if let Some(advisory) = weak::advisory_for(&function) {
		weak::emit(advisory);
	}

	for path in args.get_many::<String>("FILE").into_iter().flatten() {
		log::debug!("hashing {} {:?} of {}", algorithm, range, path);
		let digest =
			hasher.compute_path(algorithm, Path::new(path), range)?;
		println!("{}", format_digest(&digest, path, output, hash_only));
	}
	Ok(())
}

fn handle_algorithms_command(args: &clap::ArgMatches) {
	for name in registry_for(args.get_flag("extended")).names() {
		println!("{}", name);
	}
}

fn handle_realip_command(
	args: &clap::ArgMatches,
) -> Result<(), Box<dyn Error>> {
	let family = args
		.get_one::<String>("family")
		.and_then(|f| f.parse::<u8>().ok())
		.and_then(AddressFamily::from_number)
		.unwrap_or(AddressFamily::V4);
	let timeout = args.get_one::<u64>("timeout").copied().unwrap_or(20);
	let addrs =
		realip::real_ip_with_timeout(family, Duration::from_secs(timeout))?;
	for addr in addrs {
		println!("{}", addr);
	}
	Ok(())
}

#[cfg(unix)]
fn install_interrupt_hook() {
	let hook = || log::warn!("interrupted, no digest was printed for the current file");
	if let Err(err) = crate::fh::interrupt::add("fhash", hook) {
		log::warn!("{}", err);
	}
}

#[cfg(not(unix))]
fn install_interrupt_hook() {}

pub fn run() -> Result<(), Box<dyn Error>> {
	let matches = build_cli().get_matches();

	match matches.subcommand() {
		Some(("digest", args)) => {
			install_interrupt_hook();
			handle_digest_command(args)?;
		}
		Some(("algorithms", args)) => handle_algorithms_command(args),
		Some(("realip", args)) => handle_realip_command(args)?,
		Some(("completions", args)) => {
			if let Some(shell) = args.get_one::<Shell>("shell").copied() {
				let mut cmd = build_cli();
				generate(shell, &mut cmd, "fhash", &mut io::stdout());
			}
		}
		_ => {}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cli_definition_is_consistent() {
		build_cli().debug_assert();
	}

	#[test]
	fn format_digest_variants() {
		let digest = [0xde, 0xad, 0xbe, 0xef];
		assert_eq!(
			format_digest(&digest, "a.bin", OutputOptions::Hex, false),
			"deadbeef a.bin"
		);
		assert_eq!(
			format_digest(&digest, "a.bin", OutputOptions::Base64, true),
			"3q2+7w=="
		);
		assert_eq!(
			format_digest(&digest, "a.bin", OutputOptions::HexBase64, true),
			"deadbeef 3q2+7w=="
		);
	}

	#[test]
	fn digest_args_parse() {
		let matches = build_cli()
			.try_get_matches_from([
				"fhash", "digest", "-a", "sha1", "-b", "6", "-e", "11", "x",
			])
			.unwrap();
		let (_, args) = matches.subcommand().unwrap();
		assert_eq!(args.get_one::<u64>("begin"), Some(&6));
		assert_eq!(args.get_one::<u64>("end"), Some(&11));
		assert_eq!(
			args.get_one::<OutputOptions>("output"),
			Some(&OutputOptions::Hex)
		);
	}
}
