use serde::{Deserialize, Serialize};

use crate::ScriptSpec;

/// Document shape of a configuration source and of the canonical merged output.
///
/// ```yaml
/// scripts:
///   - name: ssh_port_check
///     script: nc -z localhost 22
///     timeout: 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptsFile {
    #[serde(default)]
    pub scripts: Vec<ScriptSpec>,
}

impl ScriptsFile {
    pub fn new(scripts: Vec<ScriptSpec>) -> Self {
        Self { scripts }
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Append all entries of `other`, keeping both orders.
    pub fn extend(&mut self, other: ScriptsFile) {
        self.scripts.extend(other.scripts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_scripts_key_is_empty() {
        let file: ScriptsFile = serde_yaml::from_str("other: 1\n").unwrap();
        assert!(file.is_empty());
    }

    #[test]
    fn extend_keeps_order() {
        let mut a = ScriptsFile::new(vec![ScriptSpec::new("a", "x"), ScriptSpec::new("b", "x")]);
        let b = ScriptsFile::new(vec![ScriptSpec::new("c", "x")]);
        a.extend(b);

        let names: Vec<_> = a.scripts.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn scripts_must_be_a_list() {
        assert!(serde_yaml::from_str::<ScriptsFile>("scripts: nope\n").is_err());
        assert!(serde_yaml::from_str::<ScriptsFile>("scripts:\n  - just-a-string\n").is_err());
    }
}
