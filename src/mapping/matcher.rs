use crate::mapping::errors::MappingError;
use crate::mapping::types::{Identity, IdentityMapping, PrincipalKind};
use crate::mapping::Snapshot;

/// Resolve `identity` to a Kubernetes identity using one snapshot.
///
/// Strict mode looks the identity up by its cloud-assigned user id and, if
/// the mapping also names an ARN, requires the caller to present that ARN.
/// Non-strict mode looks up the lower-cased canonical ARN.
pub fn resolve(
    identity: &Identity,
    snapshot: &Snapshot,
    userid_strict: bool,
) -> Result<IdentityMapping, MappingError> {
    let key = if userid_strict {
        identity.user_id.clone()
    } else {
        identity.canonical_arn.to_lowercase()
    };
    if key.is_empty() {
        return Err(MappingError::NotMapped);
    }

    let kind = PrincipalKind::from_arn(&identity.canonical_arn);

    let user = match kind {
        PrincipalKind::User | PrincipalKind::Unknown => snapshot.users.get(&key),
        PrincipalKind::Role => None,
    };
    if let Some(user) = user {
        check_arn(identity, &user.user_arn, userid_strict)?;
        return Ok(render(identity, &user.username, &user.groups));
    }

    let role = match kind {
        PrincipalKind::Role | PrincipalKind::Unknown => snapshot.roles.get(&key),
        PrincipalKind::User => None,
    };
    if let Some(role) = role {
        check_arn(identity, &role.role_arn, userid_strict)?;
        return Ok(render(identity, &role.username, &role.groups));
    }

    tracing::debug!(arn = %identity.arn, userid_strict, "Identity not mapped");
    Err(MappingError::NotMapped)
}

fn check_arn(identity: &Identity, mapped_arn: &str, userid_strict: bool) -> Result<(), MappingError> {
    if !userid_strict || mapped_arn.is_empty() {
        return Ok(());
    }
    if mapped_arn.eq_ignore_ascii_case(&identity.arn)
        || mapped_arn.eq_ignore_ascii_case(&identity.canonical_arn)
    {
        return Ok(());
    }
    tracing::warn!(
        arn = %identity.arn,
        user_id = %identity.user_id,
        mapped_arn,
        "UserID matched a mapping bound to a different ARN"
    );
    Err(MappingError::IdAndArnMismatch)
}

fn render(identity: &Identity, username: &str, groups: &[String]) -> IdentityMapping {
    IdentityMapping {
        identity_arn: identity.arn.clone(),
        username: expand_template(username, identity),
        groups: groups.iter().map(|g| expand_template(g, identity)).collect(),
    }
}

/// Substitute session placeholders. Unknown `{{...}}` tokens are kept as-is.
pub fn expand_template(template: &str, identity: &Identity) -> String {
    if !template.contains("{{") {
        return template.to_string();
    }
    template
        .replace("{{SessionName}}", &identity.session_name)
        .replace("{{AccountID}}", &identity.account_id)
        .replace("{{EC2PrivateDNSName}}", &identity.ec2_private_dns_name)
        .replace("{{AccessKeyID}}", &identity.access_key_id)
}
