//! Course capacity math.
//!
//! Capacity is evaluated against the live enrollment count for a course,
//! where "live" excludes withdrawn enrollments. The count itself comes from
//! the repository layer; this module holds the pure seat arithmetic and the
//! report type the API exposes.

use serde::Serialize;

/// Seat limit applied when a course is created without an explicit maximum.
pub const DEFAULT_MAX_STUDENTS: i32 = 50;

/// Whether a course with `enrolled` live enrollments can admit one more.
pub fn has_available_seats(enrolled: i64, max_students: i32) -> bool {
    enrolled < i64::from(max_students)
}

/// Number of seats still open, never negative.
pub fn seats_remaining(enrolled: i64, max_students: i32) -> i64 {
    (i64::from(max_students) - enrolled).max(0)
}

/// Seat occupancy report for a single course.
#[derive(Debug, Clone, Serialize)]
pub struct SeatAvailability {
    pub enrolled_count: i64,
    pub max_students: i32,
    pub seats_remaining: i64,
    pub has_available_seats: bool,
}

impl SeatAvailability {
    pub fn new(enrolled_count: i64, max_students: i32) -> Self {
        Self {
            enrolled_count,
            max_students,
            seats_remaining: seats_remaining(enrolled_count, max_students),
            has_available_seats: has_available_seats(enrolled_count, max_students),
        }
    }
}
