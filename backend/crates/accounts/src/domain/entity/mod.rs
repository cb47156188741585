//! Domain Entities

pub mod account;
pub mod address;
pub mod role;
pub mod verification;

pub use account::{Account, AuthContext, NewAccount, ProfileChanges};
pub use address::{Address, AddressChanges};
pub use role::{ADMIN_ROLE, DEFAULT_ROLE, Role, RoleChanges};
pub use verification::{
    OTP_MAX, OTP_MIN, VerificationChallenge, VerifiedMarker, challenge_key, marker_key,
};
