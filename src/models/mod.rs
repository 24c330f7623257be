pub mod booking;
pub mod dto;
pub mod error;
pub mod field;
pub mod token_claim;
pub mod user;
pub use booking::{BookingDetails, BookingStatus};
pub use error::Error;
pub use field::Field;
pub use token_claim::TokenClaim;
pub use user::{NewUser, Role, User};
