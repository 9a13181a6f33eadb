// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: filehash
// File: interrupt.rs
// Author: filehash maintainers

//! Process-wide shutdown hooks run on SIGINT or SIGTERM.
//!
//! The first [`add`] starts a watcher thread. When a signal arrives every
//! registered hook runs once, in name order, on that thread and the
//! process then exits with status 1. Hooks must not call [`add`] or
//! [`remove`] themselves; the registry stays locked while they run.

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread;

type Hook = Box<dyn FnOnce() + Send + 'static>;

/// Named callbacks, each run at most once.
#[derive(Default)]
pub struct HookRegistry {
	hooks: BTreeMap<String, Hook>,
}

impl HookRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `hook` under `name`, replacing a previous one.
	pub fn add<F>(&mut self, name: impl Into<String>, hook: F)
	where
		F: FnOnce() + Send + 'static,
	{
		self.hooks.insert(name.into(), Box::new(hook));
	}

	pub fn remove(&mut self, name: &str) -> bool {
		self.hooks.remove(name).is_some()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.hooks.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.hooks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.hooks.is_empty()
	}

	/// Runs and drains every hook. Returns how many ran.
	pub fn run_all(&mut self) -> usize {
		let hooks = std::mem::take(&mut self.hooks);
		let count = hooks.len();
		for (name, hook) in hooks {
			log::debug!("running shutdown hook `{}`", name);
			hook();
		}
		count
	}
}

impl fmt::Debug for HookRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.hooks.keys()).finish()
	}
}

#[derive(Debug)]
pub struct HookError {
	cause: io::Error,
}

impl fmt::Display for HookError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "could not install signal watcher: {}", self.cause)
	}
}

impl std::error::Error for HookError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		Some(&self.cause)
	}
}

#[derive(Default)]
struct State {
	hooks: HookRegistry,
	watching: bool,
}

fn state() -> MutexGuard<'static, State> {
	static STATE: OnceLock<Mutex<State>> = OnceLock::new();
	STATE
		.get_or_init(Mutex::default)
		.lock()
		.unwrap_or_else(PoisonError::into_inner)
}

/// Registers a process-wide shutdown hook under `name`.
pub fn add<F>(name: impl Into<String>, hook: F) -> Result<(), HookError>
where
	F: FnOnce() + Send + 'static,
{
	let mut state = state();
	if !state.watching {
		start_watcher().map_err(|cause| HookError { cause })?;
		state.watching = true;
	}
	state.hooks.add(name, hook);
	Ok(())
}

/// Drops the hook registered under `name`, if any.
pub fn remove(name: &str) -> bool {
	state().hooks.remove(name)
}

fn start_watcher() -> io::Result<()> {
	let mut signals = Signals::new([SIGINT, SIGTERM])?;
	thread::Builder::new()
		.name("filehash-interrupt".into())
		.spawn(move || {
			if let Some(signal) = signals.forever().next() {
				log::warn!("received signal {}, exiting", signal);
				let ran = state().hooks.run_all();
				log::debug!("{} shutdown hooks ran", ran);
				std::process::exit(1);
			}
		})?;
	Ok(())
}
