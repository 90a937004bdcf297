//! Temporary workspaces and CLI invocation helpers.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    let mut file = courier_fs::create_utf8_file(path).expect("create file");
    file.write_all(contents).expect("write file");
}

/// Parse `args` as a `courier` invocation and run it, capturing stdout.
pub(super) fn invoke(args: &[&str]) -> Result<serde_json::Value, CliError> {
    let mut invocation = vec!["courier"];
    invocation.extend_from_slice(args);
    let cli = Cli::try_parse_from(invocation)?;
    let mut buffer = Vec::new();
    dispatch(cli.command, &mut buffer)?;
    Ok(serde_json::from_slice(&buffer).expect("commands print JSON"))
}
