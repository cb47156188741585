//! Domain Value Objects

pub mod email;
pub mod person_name;
pub mod phone_number;

pub use email::Email;
pub use person_name::PersonName;
pub use phone_number::PhoneNumber;
