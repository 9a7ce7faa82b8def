use std::path::PathBuf;

/// Returns the workspace root directory (parent of the calling crate).
fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or(manifest_dir)
}

/// Returns an empty scratch directory `test_output/<name>` under the workspace root.
///
/// Any previous contents are removed, so each test should use its own name.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = workspace_root().join("test_output").join(name);
    if dir.exists() {
        std::fs::remove_dir_all(&dir)
            .unwrap_or_else(|e| panic!("Failed to clear {}: {}", dir.display(), e));
    }
    std::fs::create_dir_all(&dir)
        .unwrap_or_else(|e| panic!("Failed to create {}: {}", dir.display(), e));
    dir
}
