//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Entity-specific filter/query parameter structs live beside their models.

pub mod address;
pub mod course;
pub mod department;
pub mod enrollment;
pub mod fee;
pub mod student;
