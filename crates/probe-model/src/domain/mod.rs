mod error;
pub use error::ModelError;

mod script_spec;
pub use script_spec::ScriptSpec;

mod scripts_file;
pub use scripts_file::ScriptsFile;

mod outcome;
pub use outcome::ScriptOutcome;

mod measurement;
pub use measurement::Measurement;

/// Script timeout in whole seconds.
///
/// `0` means "no explicit timeout"; the runner decides what that maps to.
pub type TimeoutSecs = u64;
