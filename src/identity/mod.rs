use crate::config::{validate_principal, ConfigError, IdentityConfig};

pub const PRINCIPAL_ENV: &str = "RETROCHAT_PRINCIPAL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub principal: String,
    pub display_name: String,
}

impl CallerIdentity {
    pub fn new(principal: impl Into<String>) -> Self {
        let principal = principal.into();
        Self {
            display_name: principal.clone(),
            principal,
        }
    }
}

/// Resolves who is calling. `None` means the caller is not signed in.
pub trait IdentityProvider: Send + Sync {
    fn caller_identity(&self) -> Option<CallerIdentity>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    identity: Option<CallerIdentity>,
}

impl StaticIdentity {
    pub fn signed_in(principal: impl Into<String>) -> Self {
        Self {
            identity: Some(CallerIdentity::new(principal)),
        }
    }

    pub fn signed_out() -> Self {
        Self { identity: None }
    }

    pub fn with_identity(identity: CallerIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn caller_identity(&self) -> Option<CallerIdentity> {
        self.identity.clone()
    }
}

/// Identity from config, with `RETROCHAT_PRINCIPAL` taking precedence.
/// An empty override signs the caller out.
pub fn resolve_configured_identity(
    config: &IdentityConfig,
    principal_override: Option<String>,
) -> Result<StaticIdentity, ConfigError> {
    if let Some(value) = principal_override {
        let principal = value.trim();
        if principal.is_empty() {
            return Ok(StaticIdentity::signed_out());
        }
        validate_principal(PRINCIPAL_ENV, principal)?;
        return Ok(StaticIdentity::signed_in(principal));
    }
    let Some(principal) = config
        .principal
        .clone()
        .filter(|value| !value.trim().is_empty())
    else {
        return Ok(StaticIdentity::signed_out());
    };
    let display_name = config
        .display_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| principal.clone());
    Ok(StaticIdentity::with_identity(CallerIdentity {
        principal,
        display_name,
    }))
}

pub fn principal_override_from_env() -> Option<String> {
    std::env::var(PRINCIPAL_ENV).ok()
}
