//! Whole-file replacement via a sibling temporary file.
//!
//! The booking log is rewritten on every commit. Writing to a hidden sibling
//! and renaming it over the target means readers only ever observe the old
//! document or the complete new one, never a truncated file.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary sibling that is removed on drop unless it was renamed into place.
struct PendingFile<'dir> {
    dir: &'dir Dir,
    name: String,
    committed: bool,
}

impl<'dir> PendingFile<'dir> {
    fn create(dir: &'dir Dir, target: &str, contents: &[u8]) -> io::Result<Self> {
        let pending = Self {
            dir,
            name: temp_name(target),
            committed: false,
        };
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = dir.open_with(&pending.name, &options)?;
        file.write_all(contents)?;
        file.sync_all()?;
        Ok(pending)
    }

    fn rename_over(mut self, target: &str) -> io::Result<()> {
        replace(self.dir, &self.name, target)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PendingFile<'_> {
    fn drop(&mut self) {
        if !self.committed && self.dir.remove_file(&self.name).is_err() {
            tracing::debug!(file = %self.name, "temporary booking log file left behind");
        }
    }
}

fn temp_name(target: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{target}.tmp.{}.{nanos}.{counter}", std::process::id())
}

#[cfg(windows)]
fn replace(dir: &Dir, from: &str, to: &str) -> io::Result<()> {
    // Rename refuses to overwrite on Windows.
    match dir.remove_file(to) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(from, dir, to)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, from: &str, to: &str) -> io::Result<()> {
    dir.rename(from, dir, to)
}

/// Replace `file_name` inside `dir` with `contents`.
///
/// `file_name` must be a bare file name; callers resolve the parent directory
/// when opening `dir`. The directory itself is synced on a best-effort basis
/// after the rename.
pub(super) fn write_atomic(dir: &Dir, file_name: &str, contents: &[u8]) -> io::Result<()> {
    PendingFile::create(dir, file_name, contents)?.rename_over(file_name)?;
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        tracing::debug!(file = file_name, "booking log directory sync skipped");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use cap_std::ambient_authority;
    use rstest::rstest;

    use super::*;

    fn temp_dir() -> (tempfile::TempDir, Dir) {
        let root = tempfile::tempdir().expect("create temp dir");
        let dir = Dir::open_ambient_dir(root.path(), ambient_authority()).expect("open temp dir");
        (root, dir)
    }

    fn entries(dir: &Dir) -> Vec<String> {
        let mut names: Vec<String> = dir
            .entries()
            .expect("list dir")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    #[rstest]
    fn writes_new_file() {
        let (_root, dir) = temp_dir();

        write_atomic(&dir, "bookings.json", b"{}").expect("write");

        assert_eq!(dir.read_to_string("bookings.json").expect("read"), "{}");
        assert_eq!(entries(&dir), vec!["bookings.json".to_owned()]);
    }

    #[rstest]
    fn replaces_existing_contents_without_leftovers() {
        let (_root, dir) = temp_dir();
        write_atomic(&dir, "bookings.json", b"first").expect("first write");

        write_atomic(&dir, "bookings.json", b"second").expect("second write");

        assert_eq!(dir.read_to_string("bookings.json").expect("read"), "second");
        assert_eq!(entries(&dir), vec!["bookings.json".to_owned()]);
    }

    #[rstest]
    fn failed_rename_removes_temporary_file() {
        let (_root, dir) = temp_dir();
        dir.create_dir("bookings.json").expect("create blocking dir");
        dir.write("bookings.json/keep", b"x").expect("populate blocking dir");

        let result = write_atomic(&dir, "bookings.json", b"{}");

        assert!(result.is_err());
        assert_eq!(entries(&dir), vec!["bookings.json".to_owned()]);
    }
}
