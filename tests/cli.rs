use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn hello_file() -> tempfile::NamedTempFile {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(b"hello world").unwrap();
	file.flush().unwrap();
	file
}

fn fhash() -> Command {
	let mut cmd = Command::cargo_bin("fhash").unwrap();
	cmd.env("NO_COLOR", "1");
	cmd
}

#[test]
fn digest_prefix_range() {
	let file = hello_file();
	fhash()
		.args(["digest", "-a", "sha1", "-b", "0", "-e", "5", "--hash-only"])
		.arg(file.path())
		.assert()
		.success()
		.stdout("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d\n")
		.stderr(predicate::str::contains("weak algorithm"));
}

#[test]
fn digest_whole_file_with_path() {
	let file = hello_file();
	let path = file.path().to_string_lossy().to_string();
	fhash()
		.args(["digest", "-a", "sha256", &path])
		.assert()
		.success()
		.stdout(predicate::str::diff(format!(
			"b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9 {}\n",
			path
		)))
		.stderr(predicate::str::contains("weak algorithm").not());
}

#[test]
fn digest_unknown_algorithm_fails() {
	let file = hello_file();
	fhash()
		.args(["digest", "-a", "bogus"])
		.arg(file.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains(
			"md5, sha1, sha224, sha256, sha384, sha512",
		));
}

#[test]
fn digest_range_past_end_fails() {
	let file = hello_file();
	fhash()
		.args(["digest", "-a", "sha256", "-b", "3", "-e", "40"])
		.arg(file.path())
		.assert()
		.failure()
		.stdout(predicate::str::is_empty())
		.stderr(predicate::str::contains("offset 11"));
}

#[test]
fn algorithms_lists_defaults() {
	fhash()
		.arg("algorithms")
		.assert()
		.success()
		.stdout("md5\nsha1\nsha224\nsha256\nsha384\nsha512\n");
	fhash()
		.args(["algorithms", "--extended"])
		.assert()
		.success()
		.stdout(predicate::str::contains("sha3-256\n"));
}

#[test]
fn sha224_prints_note_not_weak_warning() {
	let file = hello_file();
	fhash()
		.args(["digest", "-a", "sha224", "--hash-only"])
		.arg(file.path())
		.assert()
		.success()
		.stdout("2f05477fc24bb4faefd86517156dafdecec45b8ad3cf2522a563582b\n")
		.stderr(predicate::str::contains("note: sha224"))
		.stderr(predicate::str::contains("weak algorithm").not());
}
