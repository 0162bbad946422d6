//! Address type vocabulary.

use crate::error::CoreError;

pub const TYPE_PERMANENT: &str = "Permanent";
pub const TYPE_CURRENT: &str = "Current";

/// All valid address types.
pub const VALID_ADDRESS_TYPES: &[&str] = &[TYPE_PERMANENT, TYPE_CURRENT];

/// Country recorded when an address is created without one.
pub const DEFAULT_COUNTRY: &str = "USA";

/// Validate that an address type string is one of the known types.
pub fn validate_address_type(address_type: &str) -> Result<(), CoreError> {
    if VALID_ADDRESS_TYPES.contains(&address_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid address type '{}'. Must be one of: {:?}",
            address_type, VALID_ADDRESS_TYPES
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_are_valid() {
        assert!(validate_address_type(TYPE_PERMANENT).is_ok());
        assert!(validate_address_type(TYPE_CURRENT).is_ok());
    }

    #[test]
    fn unknown_type_is_invalid() {
        assert!(validate_address_type("Mailing").is_err());
        assert!(validate_address_type("permanent").is_err());
    }
}
