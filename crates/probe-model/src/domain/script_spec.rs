use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ModelError, TimeoutSecs};

/// A named external check command.
///
/// Field order here is the canonical serialization order: `name`, `script`, `timeout`.
/// A missing `timeout` deserializes as `0` and is always serialized back explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSpec {
    /// Identifier used for selection and as the `script` metric label.
    pub name: String,
    /// Shell command line, passed verbatim to the interpreter.
    #[serde(rename = "script")]
    pub command: String,
    /// Timeout in seconds, `0` when not set.
    #[serde(default)]
    pub timeout: TimeoutSecs,
}

impl ScriptSpec {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            timeout: 0,
        }
    }

    pub fn with_timeout(mut self, timeout: TimeoutSecs) -> Self {
        self.timeout = timeout;
        self
    }

    /// Explicit deadline, `None` when the timeout is `0`.
    pub fn deadline(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }

    /// Reject specs that cannot be run or labelled.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }
        if self.command.trim().is_empty() {
            return Err(ModelError::EmptyCommand(self.name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_defaults_to_zero() {
        let spec: ScriptSpec = serde_yaml::from_str("name: a\nscript: exit 0\n").unwrap();
        assert_eq!(spec.timeout, 0);
        assert!(spec.deadline().is_none());
    }

    #[test]
    fn deadline_from_timeout() {
        let spec = ScriptSpec::new("a", "exit 0").with_timeout(3);
        assert_eq!(spec.deadline(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn command_is_serialized_as_script() {
        let spec = ScriptSpec::new("a", "exit 0");
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"name":"a","script":"exit 0","timeout":0}"#);
    }

    #[test]
    fn missing_required_fields_fail() {
        assert!(serde_yaml::from_str::<ScriptSpec>("name: a\n").is_err());
        assert!(serde_yaml::from_str::<ScriptSpec>("script: exit 0\n").is_err());
    }

    #[test]
    fn validate_rejects_blank_fields() {
        assert_eq!(
            ScriptSpec::new(" ", "exit 0").validate(),
            Err(ModelError::EmptyName)
        );
        assert_eq!(
            ScriptSpec::new("a", "").validate(),
            Err(ModelError::EmptyCommand("a".into()))
        );
        assert!(ScriptSpec::new("a", "exit 0").validate().is_ok());
    }
}
