//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-step rules (capacity
//! checks, the address primacy sweep, payment application) run inside
//! explicit transactions and report their outcome through small enums so
//! the handler layer can attach the right domain error.

pub mod address_repo;
pub mod course_repo;
pub mod department_repo;
pub mod enrollment_repo;
pub mod fee_repo;
pub mod student_repo;

pub use address_repo::AddressRepo;
pub use course_repo::CourseRepo;
pub use department_repo::DepartmentRepo;
pub use enrollment_repo::{EnrollmentInsert, EnrollmentRepo};
pub use fee_repo::{FeeRepo, PaymentOutcome};
pub use student_repo::StudentRepo;
