//! Address entity model and DTOs.

use registrar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `addresses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Address {
    pub id: DbId,
    pub student_id: DbId,
    pub address_type: String,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
    pub is_primary: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new address.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAddress {
    pub student_id: DbId,
    pub address_type: String,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    /// Defaults to `USA` if omitted.
    pub country: Option<String>,
    /// Defaults to `true` if omitted; the first address a student registers
    /// becomes their primary one unless the caller says otherwise.
    pub is_primary: Option<bool>,
}

/// DTO for updating an existing address. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAddress {
    pub address_type: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_primary: Option<bool>,
}

/// DTO for `PUT /addresses/{id}/primary`.
#[derive(Debug, Deserialize)]
pub struct SetPrimaryAddress {
    pub student_id: DbId,
}
