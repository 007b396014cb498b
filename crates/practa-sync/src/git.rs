// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal reader for the local git HEAD commit.
//!
//! Handles symbolic and detached HEADs, loose refs, `packed-refs`, and
//! worktree-style `.git` files (`gitdir: <path>`). No git binary is spawned.

use std::path::{Path, PathBuf};

use practa_core::error::PractaError;
use tracing::debug;

/// Commit SHA that HEAD resolves to, or `None` if `root` is not a git
/// checkout or HEAD points at an unborn branch.
pub fn read_head(root: &Path) -> Result<Option<String>, PractaError> {
    let Some(git_dir) = resolve_git_dir(root)? else {
        return Ok(None);
    };

    let head_path = git_dir.join("HEAD");
    let head = read_trimmed(&head_path)?;
    let Some(reference) = head.strip_prefix("ref:").map(str::trim) else {
        debug!(sha = %head, "detached HEAD");
        return Ok(Some(head));
    };

    if let Some(sha) = read_optional(&git_dir.join(reference))? {
        return Ok(Some(sha));
    }
    packed_ref(&git_dir, reference)
}

fn resolve_git_dir(root: &Path) -> Result<Option<PathBuf>, PractaError> {
    let dot_git = root.join(".git");
    if dot_git.is_dir() {
        return Ok(Some(dot_git));
    }
    if dot_git.is_file() {
        let content = read_trimmed(&dot_git)?;
        let Some(target) = content.strip_prefix("gitdir:").map(str::trim) else {
            return Err(PractaError::io(
                &dot_git,
                std::io::Error::new(std::io::ErrorKind::InvalidData, "expected 'gitdir:' line"),
            ));
        };
        let target = Path::new(target);
        return Ok(Some(if target.is_absolute() {
            target.to_path_buf()
        } else {
            root.join(target)
        }));
    }
    Ok(None)
}

fn packed_ref(git_dir: &Path, reference: &str) -> Result<Option<String>, PractaError> {
    let Some(packed) = read_optional(&git_dir.join("packed-refs"))? else {
        return Ok(None);
    };
    Ok(packed
        .lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
        .filter_map(|line| line.split_once(' '))
        .find(|(_, name)| name.trim() == reference)
        .map(|(sha, _)| sha.to_string()))
}

fn read_trimmed(path: &Path) -> Result<String, PractaError> {
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| PractaError::io(path, e))
}

fn read_optional(path: &Path) -> Result<Option<String>, PractaError> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s.trim().to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PractaError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA_A: &str = "1111111111111111111111111111111111111111";
    const SHA_B: &str = "2222222222222222222222222222222222222222";

    fn git_dir(root: &Path) -> PathBuf {
        let dir = root.join(".git");
        std::fs::create_dir_all(dir.join("refs/heads")).unwrap();
        dir
    }

    #[test]
    fn not_a_repository() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(read_head(tmp.path()).unwrap(), None);
    }

    #[test]
    fn loose_ref() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = git_dir(tmp.path());
        std::fs::write(dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        std::fs::write(dir.join("refs/heads/main"), format!("{SHA_A}\n")).unwrap();
        assert_eq!(read_head(tmp.path()).unwrap().as_deref(), Some(SHA_A));
    }

    #[test]
    fn packed_ref_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = git_dir(tmp.path());
        std::fs::write(dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        std::fs::write(
            dir.join("packed-refs"),
            format!(
                "# pack-refs with: peeled fully-peeled sorted\n{SHA_B} refs/heads/dev\n{SHA_A} refs/heads/main\n^{SHA_B}\n"
            ),
        )
        .unwrap();
        assert_eq!(read_head(tmp.path()).unwrap().as_deref(), Some(SHA_A));
    }

    #[test]
    fn detached_head() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = git_dir(tmp.path());
        std::fs::write(dir.join("HEAD"), format!("{SHA_B}\n")).unwrap();
        assert_eq!(read_head(tmp.path()).unwrap().as_deref(), Some(SHA_B));
    }

    #[test]
    fn unborn_branch() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = git_dir(tmp.path());
        std::fs::write(dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        assert_eq!(read_head(tmp.path()).unwrap(), None);
    }

    #[test]
    fn gitdir_file() {
        let tmp = tempfile::tempdir().unwrap();
        let real = tmp.path().join("real-git");
        std::fs::create_dir_all(real.join("refs/heads")).unwrap();
        std::fs::write(real.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        std::fs::write(real.join("refs/heads/main"), SHA_A).unwrap();

        let checkout = tmp.path().join("checkout");
        std::fs::create_dir_all(&checkout).unwrap();
        std::fs::write(checkout.join(".git"), "gitdir: ../real-git\n").unwrap();

        assert_eq!(read_head(&checkout).unwrap().as_deref(), Some(SHA_A));
    }
}
