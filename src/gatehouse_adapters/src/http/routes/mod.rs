pub mod change_password;
pub mod error;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod register;
pub mod reset_password;
pub mod verify_email;
pub mod verify_reset_code;

pub use change_password::{ChangePasswordRequest, change_password};
pub use error::ApiError;
pub use forgot_password::{ForgotPasswordRequest, forgot_password};
pub use login::{LoginHttpResponse, LoginRequest, login};
pub use logout::logout;
pub use register::{RegisterRequest, register};
pub use reset_password::{ResetPasswordRequest, reset_password};
pub use verify_email::{VerifyEmailQuery, verify_email};
pub use verify_reset_code::{VerifyResetCodeRequest, VerifyResetCodeResponse, verify_reset_code};

#[derive(serde::Serialize)]
pub struct MessageResponse {
    pub message: String,
}
