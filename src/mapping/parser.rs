use std::path::Path;

use crate::mapping::errors::MappingError;
use crate::mapping::types::MappingDocument;

/// Parse the raw contents of a mapping file.
///
/// Either the whole document is accepted or an error is returned; there is no
/// partially populated result. Empty input is rejected like any other
/// malformed document; only removing the file clears the mappings.
pub fn parse(contents: &[u8]) -> Result<MappingDocument, MappingError> {
    let doc: MappingDocument = serde_json::from_slice(contents).map_err(MappingError::Parse)?;
    validate(&doc)?;
    Ok(doc)
}

/// Read and parse a mapping file from disk.
pub fn parse_file(path: &Path) -> Result<MappingDocument, MappingError> {
    let contents = std::fs::read(path).map_err(|source| MappingError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&contents)
}

fn validate(doc: &MappingDocument) -> Result<(), MappingError> {
    for (i, user) in doc.users.iter().enumerate() {
        if user.user_arn.is_empty() && user.user_id.is_empty() {
            return Err(MappingError::InvalidEntry(format!(
                "mapUsers[{i}] (username `{}`) has neither `userarn` nor `userid`",
                user.username
            )));
        }
    }
    for (i, role) in doc.roles.iter().enumerate() {
        if role.role_arn.is_empty() && role.user_id.is_empty() {
            return Err(MappingError::InvalidEntry(format!(
                "mapRoles[{i}] (username `{}`) has neither `rolearn` nor `userid`",
                role.username
            )));
        }
    }
    if doc.accounts.iter().any(|a| a.trim().is_empty()) {
        return Err(MappingError::InvalidEntry(
            "mapAccounts contains an empty account id".into(),
        ));
    }
    Ok(())
}
