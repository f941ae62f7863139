//! Configuration merging.
//!
//! Every configured path is expanded (a directory becomes its files, sorted by name),
//! each file is parsed on its own, and the entries are concatenated in source order.
//! The merged list is re-serialized into a canonical YAML document: two inputs with the
//! same entries produce the same bytes regardless of their original formatting.
//!
//! The store is always built from the canonical text, never from the raw sources.
mod source;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use probe_model::ScriptsFile;
use tracing::debug;

use crate::{error::ConfigError, store::Snapshot};

const CANONICAL_ORIGIN: &str = "<merged configuration>";

/// Ordered list of configuration paths, re-read on every reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    paths: Vec<PathBuf>,
}

impl ConfigSources {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Merge all sources into canonical YAML.
    pub fn merge(&self) -> Result<String, ConfigError> {
        merge_sources(&self.paths)
    }

    /// Merge all sources and build a fresh snapshot from the canonical form.
    pub fn load(&self) -> Result<Snapshot, ConfigError> {
        load_sources(&self.paths)
    }
}

/// Merge the given sources into canonical YAML.
///
/// Fails on the first unreadable or malformed file.
pub fn merge_sources<P: AsRef<Path>>(sources: &[P]) -> Result<String, ConfigError> {
    if sources.is_empty() {
        return Err(ConfigError::NoSources);
    }

    let mut merged = ScriptsFile::default();
    for source in sources {
        for file in source::expand(source.as_ref())? {
            let parsed = source::read(&file)?;
            debug!(target: "probe.core.config", path = %file.display(), scripts = parsed.len(), "source parsed");
            merged.extend(parsed);
        }
    }

    Ok(serde_yaml::to_string(&merged)?)
}

/// Merge the given sources and parse the canonical output into a snapshot.
pub fn load_sources<P: AsRef<Path>>(sources: &[P]) -> Result<Snapshot, ConfigError> {
    let canonical = merge_sources(sources)?;
    parse_canonical(canonical)
}

/// Build a snapshot from canonical YAML text.
pub fn parse_canonical(canonical: String) -> Result<Snapshot, ConfigError> {
    let file: ScriptsFile = serde_yaml::from_str(&canonical)
        .map_err(|e| ConfigError::parse(CANONICAL_ORIGIN, e))?;

    let scripts = file.scripts.into_iter().map(Arc::new).collect();
    Ok(Snapshot::new(scripts, canonical))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const SOURCE_A: &str = "
scripts:
 - name: mesos_slave_process_check
   script: ps waux | grep -q mesos.slave

 - name: ssh_port_check
   script: nc -z -w10 $(hostname -i) 22";

    const SOURCE_B: &str = "
scripts:
 - name: apache_process_check
   script: nc -z -w10 localhost 80

 - name: java_process_check
   script: nc -z -w10 localhost 8080";

    const MERGED_AB: &str = "scripts:
- name: mesos_slave_process_check
  script: ps waux | grep -q mesos.slave
  timeout: 0
- name: ssh_port_check
  script: nc -z -w10 $(hostname -i) 22
  timeout: 0
- name: apache_process_check
  script: nc -z -w10 localhost 80
  timeout: 0
- name: java_process_check
  script: nc -z -w10 localhost 8080
  timeout: 0
";

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn merge_files_in_given_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.yml", SOURCE_A);
        let b = write(dir.path(), "b.yml", SOURCE_B);

        assert_eq!(merge_sources(&[&a, &b]).unwrap(), MERGED_AB);
    }

    #[test]
    fn merge_directory_matches_explicit_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "testFile1.yml", SOURCE_A);
        write(dir.path(), "testFile2.yml", SOURCE_B);

        assert_eq!(merge_sources(&[dir.path()]).unwrap(), MERGED_AB);
    }

    #[test]
    fn merge_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.yml", SOURCE_A);

        let expected = "scripts:
- name: mesos_slave_process_check
  script: ps waux | grep -q mesos.slave
  timeout: 0
- name: ssh_port_check
  script: nc -z -w10 $(hostname -i) 22
  timeout: 0
";
        assert_eq!(merge_sources(&[a]).unwrap(), expected);
    }

    #[test]
    fn formatting_does_not_change_canonical_output() {
        let dir = tempfile::tempdir().unwrap();
        let compact = write(
            dir.path(),
            "compact.yml",
            "scripts: [{timeout: 3, script: exit 0, name: a}]",
        );
        let verbose = write(
            dir.path(),
            "verbose.yml",
            "# leading comment\nscripts:\n\n    -   name:   a\n        script: 'exit 0'\n        timeout: 3\n",
        );

        assert_eq!(
            merge_sources(&[compact]).unwrap(),
            merge_sources(&[verbose]).unwrap()
        );
    }

    #[test]
    fn explicit_timeout_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(
            dir.path(),
            "a.yml",
            "scripts:\n  - name: slow\n    script: sleep 1\n    timeout: 5\n",
        );

        assert_eq!(
            merge_sources(&[a]).unwrap(),
            "scripts:\n- name: slow\n  script: sleep 1\n  timeout: 5\n"
        );
    }

    #[test]
    fn malformed_file_aborts_merge() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "good.yml", SOURCE_A);
        let bad = write(dir.path(), "bad.yml", "scripts:\n  - name: no_command\n");

        let err = merge_sources(&[&good, &bad]).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, bad),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = merge_sources(&[dir.path().join("missing.yml")]).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn empty_source_list_is_rejected() {
        let none: [&Path; 0] = [];
        assert!(matches!(
            merge_sources(&none),
            Err(ConfigError::NoSources)
        ));
    }

    #[test]
    fn blank_file_contributes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.yml", SOURCE_A);
        let blank = write(dir.path(), "blank.yml", "\n# nothing here\n");

        assert_eq!(
            merge_sources(&[&a, &blank]).unwrap(),
            merge_sources(&[&a]).unwrap()
        );
    }

    #[test]
    fn load_builds_snapshot_from_canonical_form() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.yml", SOURCE_A);
        write(dir.path(), "b.yml", SOURCE_B);

        let sources = ConfigSources::new([dir.path()]);
        let snapshot = sources.load().unwrap();

        assert_eq!(snapshot.canonical(), MERGED_AB);
        let names: Vec<_> = snapshot.scripts().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "mesos_slave_process_check",
                "ssh_port_check",
                "apache_process_check",
                "java_process_check",
            ]
        );
        assert!(snapshot.scripts().iter().all(|s| s.timeout == 0));
    }
}
