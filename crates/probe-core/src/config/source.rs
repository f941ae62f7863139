use std::{
    fs,
    path::{Path, PathBuf},
};

use probe_model::ScriptsFile;
use tracing::trace;

use crate::error::ConfigError;

/// Resolve one configured path into the files it stands for.
///
/// A file resolves to itself. A directory resolves to its direct non-directory entries,
/// sorted by file name; nested directories are skipped.
pub(crate) fn expand(path: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let meta = fs::metadata(path).map_err(|e| ConfigError::io(path, e))?;
    if !meta.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path).map_err(|e| ConfigError::io(path, e))? {
        let entry = entry.map_err(|e| ConfigError::io(path, e))?;
        let entry_path = entry.path();

        let meta = fs::metadata(&entry_path).map_err(|e| ConfigError::io(&entry_path, e))?;
        if meta.is_dir() {
            trace!(target: "probe.core.config", path = %entry_path.display(), "skipping nested directory");
            continue;
        }
        files.push(entry_path);
    }
    files.sort();
    Ok(files)
}

/// Read and parse a single source file.
///
/// Blank or comment-only files contribute no scripts. Every entry must carry a
/// non-empty `name` and `script`.
pub(crate) fn read(path: &Path) -> Result<ScriptsFile, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    if is_blank(&raw) {
        trace!(target: "probe.core.config", path = %path.display(), "empty source");
        return Ok(ScriptsFile::default());
    }

    let file: ScriptsFile =
        serde_yaml::from_str(&raw).map_err(|e| ConfigError::parse(path, e))?;
    for spec in &file.scripts {
        spec.validate().map_err(|e| ConfigError::parse(path, e))?;
    }
    Ok(file)
}

fn is_blank(raw: &str) -> bool {
    raw.lines().map(str::trim).all(|l| l.is_empty() || l.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("  \n\n# only a comment\n"));
        assert!(!is_blank("scripts: []"));
    }

    #[test]
    fn expand_directory_sorted_and_flat() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.yml"), "").unwrap();
        fs::write(dir.path().join("a.yml"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.yml"), "").unwrap();

        let files = expand(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.yml", "b.yml"]);
    }

    #[test]
    fn expand_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = expand(&dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn read_rejects_empty_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yml");
        fs::write(&path, "scripts:\n  - name: ''\n    script: exit 0\n").unwrap();

        let err = read(&path).unwrap_err();
        match err {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
