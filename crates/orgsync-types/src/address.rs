//! Address types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of address attached to a unit or a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    /// Postal address; prerequisite for a registration number
    Postal,
    /// Production-unit registration number (P-number). Requires a postal address.
    RegistrationNumber,
    Phone,
    Email,
    #[serde(other)]
    Other,
}

impl AddressKind {
    /// Whether the HR system requires a postal address before this kind can be attached
    pub fn requires_postal_address(&self) -> bool {
        matches!(self, AddressKind::RegistrationNumber)
    }
}

/// Address data carried by create/edit change events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPayload {
    #[serde(default)]
    pub uuid: Option<Uuid>,
    pub kind: AddressKind,
    pub value: String,
}

impl AddressPayload {
    pub fn new(kind: AddressKind, value: impl Into<String>) -> Self {
        Self {
            uuid: None,
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_maps_to_other() {
        let payload: AddressPayload =
            serde_json::from_str(r#"{"kind": "ean", "value": "5798000000000"}"#).unwrap();
        assert_eq!(payload.kind, AddressKind::Other);
        assert!(payload.uuid.is_none());
    }

    #[test]
    fn test_registration_number_requires_postal() {
        assert!(AddressKind::RegistrationNumber.requires_postal_address());
        assert!(!AddressKind::Postal.requires_postal_address());
        assert!(!AddressKind::Phone.requires_postal_address());
    }
}
