//! Non-fatal checks over loaded declarations.
use crate::account::resolve::GroupPolicy;
use crate::account::{AccountSpec, GidParam};

/// Minimum length for octal mode strings.
const OCTAL_MODE_MIN_LEN: usize = 3;

/// Maximum length for octal mode strings.
const OCTAL_MODE_MAX_LEN: usize = 4;

/// Highest uid conventionally reserved for system accounts.
const SYSTEM_UID_MAX: u32 = 999;

/// Key algorithms accepted by current OpenSSH releases.
const KNOWN_KEY_TYPES: &[&str] = &[
    "ssh-rsa",
    "ssh-dss",
    "ssh-ed25519",
    "ecdsa-sha2-nistp256",
    "ecdsa-sha2-nistp384",
    "ecdsa-sha2-nistp521",
    "sk-ssh-ed25519@openssh.com",
    "sk-ecdsa-sha2-nistp256@openssh.com",
];

/// A non-fatal issue detected in the declarations.
///
/// Warnings never stop a plan; fatal problems are reported by the resolver
/// as errors instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The validator that raised the warning (e.g. `"accounts"`, `"ssh_keys"`).
    pub source: String,
    /// The account, key, or section that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Trait for declaration validators.
pub trait ConfigValidator {
    /// Validate the declarations and return any warnings found.
    fn validate(&self) -> Vec<ValidationWarning>;

    /// Human-readable name for this validator.
    fn name(&self) -> &'static str;
}

/// Validator for account-level parameters.
#[derive(Debug)]
pub struct AccountValidator<'a> {
    accounts: &'a [AccountSpec],
}

impl<'a> AccountValidator<'a> {
    /// Create a validator over `accounts`.
    #[must_use]
    pub const fn new(accounts: &'a [AccountSpec]) -> Self {
        Self { accounts }
    }
}

impl ConfigValidator for AccountValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for spec in self.accounts {
            let mut warn = |message: String| {
                warnings.push(ValidationWarning::new(self.name(), &spec.title, message));
            };

            if let Some(shell) = &spec.shell
                && !shell.starts_with('/')
            {
                warn(format!("shell '{shell}' is not an absolute path"));
            }

            if spec.system
                && let Some(uid) = spec.uid
                && uid > SYSTEM_UID_MAX
            {
                warn(format!(
                    "system account has uid {uid}, above the system range (0-{SYSTEM_UID_MAX})"
                ));
            }

            // A numeric gid without a dedicated group is read as a group name.
            if spec.create_group == Some(false)
                && let Some(GidParam::Id(id)) = spec.gid
            {
                warn(format!(
                    "gid {id} is used as a group name because create_group is false"
                ));
            }

            let username = spec.username.as_deref().unwrap_or(&spec.title);
            if spec.create_group != Some(false) && spec.groups.iter().any(|g| g == username) {
                warn(format!(
                    "supplementary groups include the primary group '{username}'"
                ));
            }

            if let Some(password) = &spec.password
                && !looks_hashed(password)
            {
                warn("password does not look like a crypt(3) hash".to_string());
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "accounts"
    }
}

/// Whether `password` is a crypt(3) hash or a locked marker.
fn looks_hashed(password: &str) -> bool {
    password.starts_with('$') || password.starts_with('!') || password == "*"
}

/// Validator for SSH key entries.
#[derive(Debug)]
pub struct SshKeyValidator<'a> {
    accounts: &'a [AccountSpec],
}

impl<'a> SshKeyValidator<'a> {
    /// Create a validator over the keys of `accounts`.
    #[must_use]
    pub const fn new(accounts: &'a [AccountSpec]) -> Self {
        Self { accounts }
    }
}

impl ConfigValidator for SshKeyValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for spec in self.accounts {
            for (name, entry) in spec.ssh_keys.iter() {
                let item = format!("{}.{name}", spec.title);

                if let Some(key_type) = entry.key_type.as_deref()
                    && !key_type.trim().is_empty()
                    && !KNOWN_KEY_TYPES.contains(&key_type)
                {
                    warnings.push(ValidationWarning::new(
                        self.name(),
                        &item,
                        format!("unrecognised key type '{key_type}'"),
                    ));
                }

                // A pasted authorized_keys line carries the type and comment too.
                if let Some(key) = entry.key.as_deref()
                    && key.trim().contains(char::is_whitespace)
                {
                    warnings.push(ValidationWarning::new(
                        self.name(),
                        &item,
                        "key material contains whitespace; expected the base64 body only",
                    ));
                }
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "ssh_keys"
    }
}

/// Validator for the `[policy]` section.
#[derive(Debug)]
pub struct PolicyValidator<'a> {
    policy: &'a GroupPolicy,
}

impl<'a> PolicyValidator<'a> {
    /// Create a validator over `policy`.
    #[must_use]
    pub const fn new(policy: &'a GroupPolicy) -> Self {
        Self { policy }
    }
}

impl ConfigValidator for PolicyValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        match self.policy {
            GroupPolicy::Fallback(group) if group.trim().is_empty() => {
                vec![ValidationWarning::new(
                    self.name(),
                    "fallback_group",
                    "fallback group is empty",
                )]
            }
            _ => Vec::new(),
        }
    }

    fn name(&self) -> &'static str {
        "policy"
    }
}

/// Validates an octal mode string (e.g., "750", "0750").
///
/// Returns `Some(error_message)` if the mode is invalid, or `None` if valid.
pub(crate) fn validate_octal_mode(mode: &str) -> Option<String> {
    if !mode.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!(
            "invalid octal mode '{mode}': must contain only digits"
        ));
    }

    if mode.len() < OCTAL_MODE_MIN_LEN || mode.len() > OCTAL_MODE_MAX_LEN {
        return Some(format!(
            "invalid mode length '{mode}': must be {OCTAL_MODE_MIN_LEN} or {OCTAL_MODE_MAX_LEN} digits"
        ));
    }

    if let Some(c) = mode.chars().find(|&c| c > '7') {
        return Some(format!("invalid octal digit '{c}' in mode '{mode}'"));
    }

    None
}

/// Validate all declarations and return collected warnings.
#[must_use]
pub fn validate_all(config: &super::Config) -> Vec<ValidationWarning> {
    let validators: Vec<Box<dyn ConfigValidator + '_>> = vec![
        Box::new(PolicyValidator::new(&config.policy)),
        Box::new(AccountValidator::new(&config.accounts)),
        Box::new(SshKeyValidator::new(&config.accounts)),
    ];

    let mut all_warnings = Vec::new();
    for validator in validators {
        all_warnings.extend(validator.validate());
    }

    all_warnings
}
