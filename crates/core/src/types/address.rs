//! Address types shared by the profile address book and checkout.

use serde::{Deserialize, Serialize};

use crate::types::id::AddressId;

/// A saved address from the customer's address book.
///
/// At most one address per customer carries `is_default = true`; the server
/// enforces this, so after changing the default the client re-fetches
/// rather than patching flags locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Address ID.
    pub id: AddressId,
    /// Street and house number.
    pub street: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub zip_code: String,
    /// Country.
    pub country: String,
    /// Whether this is the customer's default shipping address.
    #[serde(default)]
    pub is_default: bool,
}

/// The shipping address captured on an order.
///
/// A value copy, not a reference to the address book: editing or deleting a
/// saved address never changes where a placed order ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Recipient's full name.
    pub full_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Street and house number.
    pub street: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub zip_code: String,
    /// Country.
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_wire_format_is_camel_case() {
        let json = r#"{
            "id": "addr-1",
            "street": "12 MG Road",
            "city": "Bengaluru",
            "state": "Karnataka",
            "zipCode": "560001",
            "country": "India",
            "isDefault": true
        }"#;
        let address: Address = serde_json::from_str(json).expect("deserialize");
        assert_eq!(address.zip_code, "560001");
        assert!(address.is_default);

        let back = serde_json::to_string(&address).expect("serialize");
        assert!(back.contains("\"zipCode\""));
        assert!(back.contains("\"isDefault\""));
    }

    #[test]
    fn test_default_flag_defaults_to_false() {
        let json = r#"{
            "id": "addr-2",
            "street": "4 Park St",
            "city": "Kolkata",
            "state": "West Bengal",
            "zipCode": "700016",
            "country": "India"
        }"#;
        let address: Address = serde_json::from_str(json).expect("deserialize");
        assert!(!address.is_default);
    }
}
