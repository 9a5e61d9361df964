//! Practice (tenant) and actor identity types.
//!
//! Practice management is outside the engine; a practice only matters as the
//! ownership boundary of a verification and as the caller identity the voice
//! agent gives to the insurance representative.

use serde::{Deserialize, Serialize};

/// Stable identifier of a practice, e.g. `PracticeId("practice-1")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PracticeId(pub String);

impl PracticeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for PracticeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The staff member (or system) that initiated or edited a verification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dental practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practice {
    pub id: PracticeId,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub npi_practice: Option<String>,
    pub npi_individual: Option<String>,
    pub tax_id: Option<String>,
    pub dentist_name: Option<String>,
}

impl Practice {
    /// A practice with only an id and a name; every other field empty.
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PracticeId::new(id),
            name: name.into(),
            address: None,
            city: None,
            state: None,
            zip: None,
            phone: None,
            fax: None,
            npi_practice: None,
            npi_individual: None,
            tax_id: None,
            dentist_name: None,
        }
    }

    /// Single-line postal address, skipping empty parts.
    pub fn full_address(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.address, &self.city, &self.state, &self.zip]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.trim().is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}
