use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ConfigError, Result};
use crate::helpers::paths_overlap;

/// Fail if `out_dir` contains, or sits inside, any of `inputs`.
pub(crate) fn ensure_disjoint(out_dir: &Path, inputs: &[PathBuf]) -> Result<()> {
    match inputs.iter().find(|input| paths_overlap(out_dir, input)) {
        Some(input) => Err(ConfigError::OutputOverlapsSources {
            output: out_dir.to_path_buf(),
            input: input.clone(),
        }),
        None => Ok(()),
    }
}

/// Remove everything inside `out_dir`, keeping the directory itself.
///
/// Creates the directory if it does not exist.
pub(crate) fn clean_output_dir(out_dir: &Path) -> Result<()> {
    if !out_dir.exists() {
        fs::create_dir_all(out_dir)?;
        return Ok(());
    }

    if !out_dir.is_dir() {
        return Err(ConfigError::OutputNotDirectory {
            path: out_dir.to_path_buf(),
        });
    }

    for entry in fs::read_dir(out_dir)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }

    Ok(())
}

/// Recursively copy `from` into `to`, returning the files written.
pub(crate) fn copy_dir(from: &Path, to: &Path) -> Result<Vec<PathBuf>> {
    if !from.is_dir() {
        return Err(ConfigError::StaticDirNotFound {
            path: from.to_path_buf(),
        });
    }
    ensure_disjoint(to, &[from.to_path_buf()])?;

    let mut written = Vec::new();
    for entry in WalkDir::new(from).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        let Ok(relative) = entry.path().strip_prefix(from) else {
            continue;
        };
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            written.push(target);
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn clean_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("dist");
        clean_output_dir(&out).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn clean_removes_contents_but_keeps_directory() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("dist");
        fs::create_dir_all(out.join("nested")).unwrap();
        fs::write(out.join("old.js"), "stale").unwrap();
        fs::write(out.join("nested/old.css"), "stale").unwrap();

        clean_output_dir(&out).unwrap();

        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn clean_rejects_file_path() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("dist");
        fs::write(&out, "not a dir").unwrap();
        assert!(matches!(
            clean_output_dir(&out),
            Err(ConfigError::OutputNotDirectory { .. })
        ));
    }

    #[test]
    fn copy_preserves_tree() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("static");
        fs::create_dir_all(from.join("img")).unwrap();
        fs::write(from.join("robots.txt"), "User-agent: *").unwrap();
        fs::write(from.join("img/logo.png"), [0u8, 1, 2]).unwrap();

        let to = dir.path().join("dist/static");
        let written = copy_dir(&from, &to).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(fs::read(to.join("img/logo.png")).unwrap(), vec![0u8, 1, 2]);
        assert!(to.join("robots.txt").is_file());
    }

    #[test]
    fn copy_refuses_target_inside_source() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("static");
        fs::create_dir_all(&from).unwrap();
        fs::write(from.join("robots.txt"), "User-agent: *").unwrap();

        let result = copy_dir(&from, &from.join("static"));
        assert!(matches!(
            result,
            Err(ConfigError::OutputOverlapsSources { .. })
        ));
        assert!(!from.join("static").exists());
    }

    #[test]
    fn disjoint_check_accepts_sibling_directories() {
        let inputs = vec![PathBuf::from("/srv/app/src/index")];
        assert!(ensure_disjoint(Path::new("/srv/app/dist"), &inputs).is_ok());
        assert!(ensure_disjoint(Path::new("/srv/app/src"), &inputs).is_err());
        assert!(ensure_disjoint(Path::new("/srv/app"), &inputs).is_err());
    }

    #[test]
    fn copy_requires_source_directory() {
        let dir = TempDir::new().unwrap();
        let result = copy_dir(&dir.path().join("missing"), &dir.path().join("out"));
        assert!(matches!(result, Err(ConfigError::StaticDirNotFound { .. })));
    }
}
