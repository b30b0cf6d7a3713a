pub mod use_cases;

pub use use_cases::{
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    forgot_password::{ForgotPasswordError, ForgotPasswordUseCase, GENERIC_RECOVERY_RESPONSE},
    login::{LoginError, LoginResponse, LoginUseCase},
    register::{RegisterError, RegisterUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    verify_email::{VerifyEmailError, VerifyEmailUseCase},
    verify_reset_code::{VerifyResetCodeError, VerifyResetCodeUseCase},
};
