use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        if let Ok(read_dir) = fs::read_dir(&dir) {
            for entry in read_dir.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
                    files.push(path);
                }
            }
        }
    }
    files
}

fn file_contains(path: &Path, needle: &str) -> bool {
    fs::read_to_string(path)
        .map(|c| c.contains(needle))
        .unwrap_or(false)
}

/// Credential columns never leave the user repository. Every projection the
/// API serves selects explicit columns, so a new query touching
/// `password_hash` or `refresh_token` outside the repo is a leak in the
/// making.
#[test]
fn credential_columns_only_in_user_repo() {
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");

    let allowed = ["src/db/user_repo.rs"];

    let mut offenders = Vec::new();
    for file in collect_rs_files(&src_root) {
        let path_str = file.to_string_lossy();
        if allowed.iter().any(|a| path_str.ends_with(a)) {
            continue;
        }
        if file_contains(&file, "password_hash") || file_contains(&file, "refresh_token") {
            offenders.push(path_str.to_string());
        }
    }

    if !offenders.is_empty() {
        panic!(
            "Credential columns must stay inside the user repository. Offenders: {:?}",
            offenders
        );
    }
}
