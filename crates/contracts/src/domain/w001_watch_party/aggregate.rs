use crate::domain::w002_account::aggregate::AccountAddress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор вечеринки просмотра (свободный текст)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(pub String);

impl PartyId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Обрезанная копия; пустой идентификатор отклоняется
    pub fn normalized(&self) -> Result<Self, String> {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            return Err("Party ID is required".into());
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Access requests
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl AccessRequestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AccessRequestStatus::Pending => "Pending",
            AccessRequestStatus::Approved => "Approved",
            AccessRequestStatus::Rejected => "Rejected",
        }
    }
}

/// Запрос на доступ к вечеринке
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessRequest {
    pub requester: AccountAddress,
    #[serde(rename = "partyId")]
    pub party_id: PartyId,
    pub status: AccessRequestStatus,
    #[serde(rename = "requestedAt", default)]
    pub requested_at: Option<DateTime<Utc>>,
}

/// Результат отправки запроса на доступ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessRequestReceipt {
    #[serde(rename = "partyId")]
    pub party_id: PartyId,
    pub requester: AccountAddress,
    #[serde(rename = "txHash", default)]
    pub tx_hash: Option<String>,
}

/// Ответ на выборку запросов: список плюс признак администратора
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccessRequestsPage {
    pub requests: Vec<AccessRequest>,
    #[serde(rename = "isPartyAdmin", default)]
    pub is_party_admin: bool,
}
