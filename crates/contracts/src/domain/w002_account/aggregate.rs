use crate::shared::web3::is_hex_address;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Account address
// ============================================================================

/// Адрес аккаунта кошелька
///
/// `new` хранит то, что вернул кошелёк; `parse` требует форму
/// `0x` + 40 hex-цифр и приводит к нижнему регистру.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(pub String);

impl AccountAddress {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if !is_hex_address(s) {
            return Err(format!("Invalid account address: {}", s));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Краткая форма `0x1234…abcd` для отображения
    pub fn short(&self) -> String {
        let s = self.0.as_str();
        if s.len() <= 12 || !s.is_ascii() {
            return s.to_string();
        }
        format!("{}…{}", &s[..6], &s[s.len() - 4..])
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Account list
// ============================================================================

/// Упорядоченный список аккаунтов; первый считается активным
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountList(pub Vec<AccountAddress>);

impl AccountList {
    pub fn new(accounts: Vec<AccountAddress>) -> Self {
        Self(accounts)
    }

    /// Разбор ответа кошелька; первый некорректный адрес отклоняет весь список
    pub fn parse_all<I, S>(raw: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .map(|s| AccountAddress::parse(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn primary(&self) -> Option<&AccountAddress> {
        self.0.first()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountAddress> {
        self.0.iter()
    }

    pub fn as_strings(&self) -> Vec<String> {
        self.0.iter().map(|a| a.0.clone()).collect()
    }
}
