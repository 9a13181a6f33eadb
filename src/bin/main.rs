// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: filehash
// File: main.rs
// Author: filehash maintainers

use env_logger::Env;
use filehash::fh::app;

fn main() {
	env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
		.init();
	if let Err(err) = app::run() {
		eprintln!("error: {}", err);
		std::process::exit(1);
	}
}
