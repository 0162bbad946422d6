//! Request handlers.
//!
//! Handlers enforce the rule layer: parent-existence checks, natural-key
//! uniqueness, vocabulary validation, deletion guards. Multi-step mutations
//! (capacity-checked enrollment, payments, the address primacy sweep) are
//! delegated to transactional repository methods and their outcomes mapped
//! to domain errors here.

pub mod addresses;
pub mod courses;
pub mod departments;
pub mod enrollments;
pub mod fees;
pub mod students;
