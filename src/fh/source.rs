// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: filehash
// File: source.rs
// Author: filehash maintainers

//! Positional read capability consumed by the bounded stream.

use std::fs::File;
use std::io;
use std::sync::Arc;

/// A data source that can be read at arbitrary absolute offsets.
///
/// `read_at` may return fewer bytes than `buf` holds. `Ok(0)` for a
/// non-empty `buf` means no data exists at or after `offset`.
/// Implementations must not depend on a shared cursor so that
/// independent callers can read the same source concurrently.
pub trait RandomAccessSource {
	fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;
}

#[cfg(unix)]
impl RandomAccessSource for File {
	fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
		std::os::unix::fs::FileExt::read_at(self, buf, offset)
	}
}

// seek_read moves the handle cursor, but every call passes its own
// offset so no caller relies on it.
#[cfg(windows)]
impl RandomAccessSource for File {
	fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
		std::os::windows::fs::FileExt::seek_read(self, buf, offset)
	}
}

impl RandomAccessSource for [u8] {
	fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
		let start = match usize::try_from(offset) {
			Ok(start) if start < self.len() => start,
			_ => return Ok(0),
		};
		let count = buf.len().min(self.len() - start);
		buf[..count].copy_from_slice(&self[start..start + count]);
		Ok(count)
	}
}

impl RandomAccessSource for Vec<u8> {
	fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
		self.as_slice().read_at(buf, offset)
	}
}

impl<T: RandomAccessSource + ?Sized> RandomAccessSource for &T {
	fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
		(**self).read_at(buf, offset)
	}
}

impl<T: RandomAccessSource + ?Sized> RandomAccessSource for Box<T> {
	fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
		(**self).read_at(buf, offset)
	}
}

impl<T: RandomAccessSource + ?Sized> RandomAccessSource for Arc<T> {
	fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
		(**self).read_at(buf, offset)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn slice_reads_are_positional() {
		let data: &[u8] = b"hello world";
		let mut buf = [0u8; 5];
		assert_eq!(data.read_at(&mut buf, 6).unwrap(), 5);
		assert_eq!(&buf, b"world");
		assert_eq!(data.read_at(&mut buf, 0).unwrap(), 5);
		assert_eq!(&buf, b"hello");
	}

	#[test]
	fn slice_short_read_and_end_marker() {
		let data: &[u8] = b"hello world";
		let mut buf = [0u8; 8];
		assert_eq!(data.read_at(&mut buf, 9).unwrap(), 2);
		assert_eq!(&buf[..2], b"ld");
		assert_eq!(data.read_at(&mut buf, 11).unwrap(), 0);
		assert_eq!(data.read_at(&mut buf, u64::MAX).unwrap(), 0);
	}

	#[cfg(any(unix, windows))]
	#[test]
	fn file_reads_are_positional() {
		let mut file = tempfile::tempfile().unwrap();
		file.write_all(b"0123456789").unwrap();
		let mut buf = [0u8; 3];
		assert_eq!(
			RandomAccessSource::read_at(&file, &mut buf, 4).unwrap(),
			3
		);
		assert_eq!(&buf, b"456");
		assert_eq!(
			RandomAccessSource::read_at(&file, &mut buf, 10).unwrap(),
			0
		);
	}

	#[test]
	fn shared_wrappers_delegate() {
		let data = Arc::new(b"abc".to_vec());
		let mut buf = [0u8; 2];
		assert_eq!(data.read_at(&mut buf, 1).unwrap(), 2);
		assert_eq!(&buf, b"bc");
		let boxed: Box<dyn RandomAccessSource> = Box::new(b"xyz".to_vec());
		assert_eq!(boxed.read_at(&mut buf, 2).unwrap(), 1);
	}
}
