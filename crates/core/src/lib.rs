//! Domain core for the student records backend.
//!
//! Pure types and rules shared by the database and API layers: the error
//! taxonomy, ID/timestamp aliases, the closed status vocabularies for each
//! entity, and the arithmetic behind fee payments and course capacity.
//! Nothing in this crate performs I/O.

pub mod address;
pub mod course;
pub mod enrollment;
pub mod error;
pub mod fee;
pub mod student;
pub mod types;
