//! Trading partner configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tenancy::TenantId;
use crate::Id;

/// Placeholder rendered in place of stored credentials on every read path.
pub const MASKED_SECRET: &str = "********";

/// Wire format a partner exchanges messages in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartnerFormat {
    Edifact,
    FlatFile,
    Xml,
    Json,
}

impl std::fmt::Display for PartnerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartnerFormat::Edifact => write!(f, "EDIFACT"),
            PartnerFormat::FlatFile => write!(f, "FLAT_FILE"),
            PartnerFormat::Xml => write!(f, "XML"),
            PartnerFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Partner lifecycle status. Partners are never hard-deleted; they are
/// deactivated instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartnerStatus {
    Active,
    Inactive,
    Testing,
}

/// SFTP connection settings. All optional; transport itself is handled
/// outside the core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SftpSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub inbound_path: Option<String>,
    pub outbound_path: Option<String>,
}

/// A configured trading partner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdiPartner {
    pub id: Id,
    pub tenant: TenantId,
    /// Unique within the tenant.
    pub code: String,
    pub name: String,
    pub tax_id: Option<String>,
    pub format: PartnerFormat,
    pub sftp: SftpSettings,
    pub webhook_url: Option<String>,
    pub status: PartnerStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl EdiPartner {
    /// Copy of this partner safe to hand to callers: the stored SFTP
    /// password, if any, is replaced by a fixed placeholder.
    pub fn masked(&self) -> Self {
        let mut partner = self.clone();
        if partner.sftp.password.is_some() {
            partner.sftp.password = Some(MASKED_SECRET.to_string());
        }
        partner
    }
}

/// Payload for creating a partner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerDraft {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub tax_id: Option<String>,
    pub format: PartnerFormat,
    #[serde(default)]
    pub sftp: SftpSettings,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_status")]
    pub status: PartnerStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_status() -> PartnerStatus {
    PartnerStatus::Active
}

/// In-place update of a partner. The partner `code` is immutable after
/// creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartnerPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub format: Option<PartnerFormat>,
    #[serde(default)]
    pub sftp: Option<SftpSettings>,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub status: Option<PartnerStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}
