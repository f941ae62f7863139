use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("script name is empty")]
    EmptyName,
    #[error("script `{0}` has an empty command")]
    EmptyCommand(String),
}
