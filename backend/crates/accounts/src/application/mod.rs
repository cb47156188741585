//! Accounts Application Layer - Use Cases

pub mod change_password;
pub mod config;
pub mod login;
pub mod logout;
pub mod profile;
pub mod refresh_token;
pub mod register;
pub mod reset_password;
pub mod send_otp;
pub mod verify_otp;

pub use change_password::ChangePasswordUseCase;
pub use login::{LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use profile::{ProfileUseCase, UpdateProfileInput};
pub use refresh_token::{RefreshTokenOutput, RefreshTokenUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use send_otp::{SendOtpOutput, SendOtpUseCase};
pub use verify_otp::{VerifyOtpInput, VerifyOtpUseCase};
