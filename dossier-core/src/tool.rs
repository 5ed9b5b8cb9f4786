//! Typed tool payloads.
//!
//! Tool inputs and outputs are tagged unions keyed by the tool kind rather
//! than untyped JSON blobs. The `raw` field on outputs carries whatever the
//! underlying tool printed beyond the structured fields, so no information
//! from the executor is lost.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DossierError, DossierResult};

/// The external OSINT tools a job can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    UsernameSearch,
    DomainRecon,
    EmailLookup,
    PhoneLookup,
    ImageMetadata,
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ToolKind::UsernameSearch => "username_search",
            ToolKind::DomainRecon => "domain_recon",
            ToolKind::EmailLookup => "email_lookup",
            ToolKind::PhoneLookup => "phone_lookup",
            ToolKind::ImageMetadata => "image_metadata",
        };
        write!(f, "{}", s)
    }
}

/// Input payload for one tool invocation, tagged by tool kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolInput {
    UsernameSearch { username: String },
    DomainRecon { domain: String },
    EmailLookup { email: String },
    PhoneLookup { phone: String },
    ImageMetadata { image_url: String },
}

impl ToolInput {
    /// The tool this input targets.
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolInput::UsernameSearch { .. } => ToolKind::UsernameSearch,
            ToolInput::DomainRecon { .. } => ToolKind::DomainRecon,
            ToolInput::EmailLookup { .. } => ToolKind::EmailLookup,
            ToolInput::PhoneLookup { .. } => ToolKind::PhoneLookup,
            ToolInput::ImageMetadata { .. } => ToolKind::ImageMetadata,
        }
    }

    /// The subject of the lookup, for display and report headings.
    pub fn target(&self) -> &str {
        match self {
            ToolInput::UsernameSearch { username } => username,
            ToolInput::DomainRecon { domain } => domain,
            ToolInput::EmailLookup { email } => email,
            ToolInput::PhoneLookup { phone } => phone,
            ToolInput::ImageMetadata { image_url } => image_url,
        }
    }

    /// Validate the input fields for this tool.
    ///
    /// Validation is intentionally shallow: it rejects empty or obviously
    /// malformed targets before a job row is created, and leaves deeper
    /// semantics to the external tool itself.
    pub fn validate(&self) -> DossierResult<()> {
        match self {
            ToolInput::UsernameSearch { username } => {
                require_non_empty("username", username)?;
                if username.chars().any(char::is_whitespace) {
                    return Err(DossierError::invalid_value(
                        "username",
                        "must not contain whitespace",
                    ));
                }
            }
            ToolInput::DomainRecon { domain } => {
                require_non_empty("domain", domain)?;
                if !domain.contains('.') || domain.chars().any(char::is_whitespace) {
                    return Err(DossierError::invalid_value(
                        "domain",
                        "must be a bare domain name such as example.com",
                    ));
                }
            }
            ToolInput::EmailLookup { email } => {
                require_non_empty("email", email)?;
                let valid = match email.split_once('@') {
                    Some((local, host)) => {
                        !local.is_empty() && host.contains('.') && !host.ends_with('.')
                    }
                    None => false,
                };
                if !valid {
                    return Err(DossierError::invalid_value(
                        "email",
                        "must be a valid email address",
                    ));
                }
            }
            ToolInput::PhoneLookup { phone } => {
                require_non_empty("phone", phone)?;
                let digits = phone.chars().filter(char::is_ascii_digit).count();
                if digits < 7 {
                    return Err(DossierError::invalid_value(
                        "phone",
                        "must contain at least 7 digits",
                    ));
                }
            }
            ToolInput::ImageMetadata { image_url } => {
                require_non_empty("image_url", image_url)?;
                if !image_url.starts_with("http://") && !image_url.starts_with("https://") {
                    return Err(DossierError::invalid_value(
                        "image_url",
                        "must be an http or https URL",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// One account discovered by a username search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FoundAccount {
    pub site: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// One DNS record discovered by domain recon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DnsRecord {
    pub record_type: String,
    pub value: String,
}

/// Output payload produced by the external executor, tagged by tool kind.
///
/// Populated only once the job reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolOutput {
    UsernameSearch {
        accounts: Vec<FoundAccount>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
        raw: Option<Value>,
    },
    DomainRecon {
        records: Vec<DnsRecord>,
        subdomains: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
        raw: Option<Value>,
    },
    EmailLookup {
        breaches: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
        raw: Option<Value>,
    },
    PhoneLookup {
        carrier: Option<String>,
        country: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
        raw: Option<Value>,
    },
    ImageMetadata {
        #[cfg_attr(feature = "openapi", schema(value_type = Object))]
        fields: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
        raw: Option<Value>,
    },
}

impl ToolOutput {
    /// The tool this output came from.
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolOutput::UsernameSearch { .. } => ToolKind::UsernameSearch,
            ToolOutput::DomainRecon { .. } => ToolKind::DomainRecon,
            ToolOutput::EmailLookup { .. } => ToolKind::EmailLookup,
            ToolOutput::PhoneLookup { .. } => ToolKind::PhoneLookup,
            ToolOutput::ImageMetadata { .. } => ToolKind::ImageMetadata,
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> DossierResult<()> {
    if value.trim().is_empty() {
        return Err(DossierError::missing_field(field));
    }
    Ok(())
}
