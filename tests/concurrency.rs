use filehash::fh::registry::SHA256;
use filehash::{ByteRange, Hasher};
use std::io::Write;

fn sample(len: usize) -> Vec<u8> {
	(0..len).map(|i| (i % 239) as u8 ^ 0x5a).collect()
}

fn ranges() -> Vec<ByteRange> {
	vec![
		ByteRange::new(0, 65_536).unwrap(),
		ByteRange::new(1_000, 30_000).unwrap(),
		ByteRange::new(20_000, 60_000).unwrap(),
		ByteRange::new(65_535, 65_536).unwrap(),
		ByteRange::new(7, 7).unwrap(),
		ByteRange::whole(),
	]
}

#[test]
fn concurrent_calls_on_one_file_match_sequential_results() {
	let data = sample(65_536);
	let mut file = tempfile::tempfile().unwrap();
	file.write_all(&data).unwrap();
	let hasher = Hasher::default();

	let expected: Vec<Vec<u8>> = ranges()
		.into_iter()
		.map(|range| hasher.compute(&SHA256, &file, range).unwrap())
		.collect();

	std::thread::scope(|scope| {
		let handles: Vec<_> = (0..8)
			.flat_map(|_| ranges().into_iter().enumerate())
			.map(|(idx, range)| {
				let file = &file;
				let hasher = &hasher;
				scope.spawn(move || {
					(idx, hasher.compute(&SHA256, file, range).unwrap())
				})
			})
			.collect();
		for handle in handles {
			let (idx, digest) = handle.join().unwrap();
			assert_eq!(digest, expected[idx]);
		}
	});
}

#[test]
fn concurrent_calls_on_shared_memory() {
	let data = std::sync::Arc::new(sample(10_000));
	let hasher = Hasher::default();
	let expected = hasher
		.compute_by_name("md5", &*data, ByteRange::new(100, 9_000).unwrap())
		.unwrap();
	std::thread::scope(|scope| {
		for _ in 0..4 {
			let data = std::sync::Arc::clone(&data);
			let hasher = &hasher;
			let expected = &expected;
			scope.spawn(move || {
				let range = ByteRange::new(100, 9_000).unwrap();
				let got = hasher.compute_by_name("md5", data, range).unwrap();
				assert_eq!(&got, expected);
			});
		}
	});
}
