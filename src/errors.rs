use miette::Diagnostic;
use thiserror::Error;

use crate::mapping::errors::MappingError;

#[derive(Debug, Error, Diagnostic)]
pub enum MapperError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Mapping(#[from] MappingError),

    #[error("I/O error: {0}")]
    #[diagnostic(code(iam_mapper::io))]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    #[diagnostic(code(iam_mapper::config))]
    Config(#[from] config::ConfigError),

    #[error("Watcher task failed: {0}")]
    #[diagnostic(code(iam_mapper::watcher))]
    Watcher(#[from] tokio::task::JoinError),
}
