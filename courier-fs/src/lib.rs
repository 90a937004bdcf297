//! Filesystem helpers shared by the Courier data, model and CLI crates.
//!
//! All access goes through `cap-std` ambient authority with `camino` UTF-8
//! paths, so callers get one consistent error surface (`std::io::Error`).
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Open an existing file for reading.
///
/// # Errors
/// Propagates the underlying IO error, e.g. `NotFound`.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create (or truncate) a file for writing, creating missing parent
/// directories first.
///
/// # Errors
/// Propagates IO errors from directory or file creation.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    ensure_parent_dir(path)?;
    fs_utf8::File::create_ambient(path, ambient_authority())
}

/// Create the parent directory of `path` when it is missing.
///
/// # Errors
/// Propagates IO errors from directory creation.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => {
            fs_utf8::Dir::create_ambient_dir_all(parent, ambient_authority())
        }
        _ => Ok(()),
    }
}

/// Return whether `path` exists and is a regular file.
///
/// # Errors
/// Returns the IO error raised while inspecting the path; a missing path
/// surfaces as `NotFound`.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// List regular files directly inside `dir` whose extension matches
/// `extension` (case-insensitive), sorted lexically.
///
/// # Errors
/// Propagates IO errors from opening or reading the directory.
pub fn list_files_with_extension(dir: &Utf8Path, extension: &str) -> io::Result<Vec<Utf8PathBuf>> {
    let handle = fs_utf8::Dir::open_ambient_dir(dir, ambient_authority())?;
    let mut found = Vec::new();
    for entry in handle.entries()? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name()?;
        let matches = Utf8Path::new(&name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches {
            found.push(dir.join(name));
        }
    }
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::io::{Read, Write};
    use tempfile::TempDir;

    #[fixture]
    fn workspace() -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 tempdir");
        (tmp, root)
    }

    #[rstest]
    fn create_then_open_round_trips_contents(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let path = root.join("nested/deeper/records.csv");
        let mut file = create_utf8_file(&path).expect("create file");
        file.write_all(b"a,b\n").expect("write");
        drop(file);

        let mut contents = String::new();
        open_utf8_file(&path)
            .expect("open file")
            .read_to_string(&mut contents)
            .expect("read");
        assert_eq!(contents, "a,b\n");
        assert!(file_is_file(&path).expect("inspect"));
    }

    #[rstest]
    fn directories_are_not_files(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let dir = root.join("folder");
        fs_utf8::Dir::create_ambient_dir_all(&dir, ambient_authority()).expect("mkdir");
        assert!(!file_is_file(&dir).expect("inspect"));
    }

    #[rstest]
    fn missing_files_report_not_found(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let err = file_is_file(&root.join("absent.txt")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn listing_filters_by_extension(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        for name in ["b.txt", "a.TXT", "notes.md"] {
            create_utf8_file(&root.join(name)).expect("create file");
        }
        let listed = list_files_with_extension(&root, "txt").expect("list");
        let names: Vec<_> = listed.iter().filter_map(|p| p.file_name()).collect();
        assert_eq!(names, ["a.TXT", "b.txt"]);
    }
}
