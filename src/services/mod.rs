//! Booking creation and the payment transition.
//!
//! Request validation and pricing are pure functions; the flows that touch
//! the database run their reads and writes inside a single transaction.
pub mod booking;
pub mod payment;
