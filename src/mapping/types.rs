use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ---------- Mapping document types ----------

/// Static mapping of one IAM user to a Kubernetes identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMapping {
    #[serde(rename = "userarn", default)]
    pub user_arn: String,
    #[serde(rename = "userid", default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Mapping of an IAM role. `username` and `groups` may carry placeholders
/// such as `{{SessionName}}` that are expanded per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMapping {
    #[serde(rename = "rolearn", default)]
    pub role_arn: String,
    #[serde(rename = "userid", default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Result of parsing one version of the mapping file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocument {
    #[serde(rename = "mapRoles", default)]
    pub roles: Vec<RoleMapping>,
    #[serde(rename = "mapUsers", default)]
    pub users: Vec<UserMapping>,
    #[serde(rename = "mapAccounts", default)]
    pub accounts: BTreeSet<String>,
}

// ---------- Request path types ----------

/// A verified AWS identity as produced by STS token verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// ARN as returned by `sts:GetCallerIdentity`, e.g. an assumed-role session ARN
    pub arn: String,
    /// ARN with session details stripped, e.g. `arn:aws:iam::123:role/Admin`
    pub canonical_arn: String,
    /// Cloud-assigned immutable id (`AIDA...` for users, `AROA...` for roles)
    pub user_id: String,
    pub account_id: String,
    // Session attributes, empty when the token did not carry them
    pub session_name: String,
    pub ec2_private_dns_name: String,
    pub access_key_id: String,
}

/// Kubernetes identity an IAM identity resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityMapping {
    pub identity_arn: String,
    pub username: String,
    pub groups: Vec<String>,
}

/// Principal type encoded in an IAM ARN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalKind {
    User,
    Role,
    Unknown,
}

impl PrincipalKind {
    /// Classify by the resource part of an ARN, e.g. `...:user/alice` or
    /// `...:assumed-role/Admin/session`.
    pub fn from_arn(arn: &str) -> Self {
        let resource = arn.splitn(6, ':').nth(5).unwrap_or("");
        match resource.split_once('/').map(|(kind, _)| kind) {
            Some("user") => PrincipalKind::User,
            Some("role") | Some("assumed-role") => PrincipalKind::Role,
            _ => PrincipalKind::Unknown,
        }
    }
}
