use std::sync::Arc;

use probe_model::ScriptSpec;
use regex::Regex;
use tracing::trace;

use crate::error::FilterError;

/// Compiled request selectors.
///
/// An empty `name` or `pattern` means that selector is absent. At least one must be set.
#[derive(Debug, Clone)]
pub struct Selector {
    name: Option<String>,
    pattern: Option<Regex>,
}

impl Selector {
    /// Validate and compile the selectors of a request.
    pub fn new(name: &str, pattern: &str) -> Result<Self, FilterError> {
        if name.is_empty() && pattern.is_empty() {
            return Err(FilterError::MissingSelector);
        }

        let pattern = if pattern.is_empty() {
            None
        } else {
            let re = Regex::new(pattern).map_err(|source| FilterError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            Some(re)
        };

        Ok(Self {
            name: (!name.is_empty()).then(|| name.to_string()),
            pattern,
        })
    }

    /// Exact name match or unanchored pattern match.
    pub fn matches(&self, script: &ScriptSpec) -> bool {
        if self.name.as_deref() == Some(script.name.as_str()) {
            return true;
        }
        self.pattern
            .as_ref()
            .is_some_and(|re| re.is_match(&script.name))
    }

    /// Scripts selected from `scripts`, in their original order.
    pub fn select(&self, scripts: &[Arc<ScriptSpec>]) -> Vec<Arc<ScriptSpec>> {
        let selected: Vec<_> = scripts
            .iter()
            .filter(|s| self.matches(s))
            .cloned()
            .collect();
        trace!(target: "probe.core.filter", selected = selected.len(), total = scripts.len(), "scripts selected");
        selected
    }
}

/// Select the scripts to run for a request.
///
/// Both selectors set yields the union of their matches, in store order, without duplicates.
/// An empty result is not an error.
pub fn filter(
    scripts: &[Arc<ScriptSpec>],
    name: &str,
    pattern: &str,
) -> Result<Vec<Arc<ScriptSpec>>, FilterError> {
    Ok(Selector::new(name, pattern)?.select(scripts))
}
