mod error;
pub use error::ExecError;

mod config;
pub use config::{ExecConfig, Shell};

mod runner;
pub use runner::ScriptRunner;

mod util;

pub mod prelude {
    pub use crate::error::ExecError;
    pub use crate::{ExecConfig, ScriptRunner, Shell};
}
