use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MappingError {
    #[error("Failed to parse mapping document")]
    #[diagnostic(
        code(iam_mapper::mapping::parse),
        help("The mapping file must be a JSON object with `mapRoles`, `mapUsers` and `mapAccounts` arrays")
    )]
    Parse(#[source] serde_json::Error),

    #[error("Invalid mapping entry: {0}")]
    #[diagnostic(
        code(iam_mapper::mapping::invalid_entry),
        help("Every `mapUsers` entry needs `userarn` or `userid`, every `mapRoles` entry needs `rolearn` or `userid`")
    )]
    InvalidEntry(String),

    #[error("Identity is not mapped")]
    #[diagnostic(code(iam_mapper::mapping::not_mapped))]
    NotMapped,

    #[error("UserID and ARN of the identity do not match the mapping")]
    #[diagnostic(
        code(iam_mapper::mapping::id_arn_mismatch),
        help("In userid-strict mode a mapping that names an ARN only matches callers presenting that ARN")
    )]
    IdAndArnMismatch,

    #[error("No dynamic mapping file path configured")]
    #[diagnostic(
        code(iam_mapper::mapping::missing_path),
        help("Set `mapping.dynamic_file_path` in the configuration file or IAM_MAPPER__MAPPING__DYNAMIC_FILE_PATH")
    )]
    MissingPath,

    #[error("Failed to read mapping file `{path}`")]
    #[diagnostic(code(iam_mapper::mapping::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
