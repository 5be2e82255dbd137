//! Account lifecycle: signup, email verification and password reset.

pub mod service;

pub use service::{
    AccountService, ForgotPasswordRequest, ResetPasswordRequest, SignupOutcome, SignupRequest,
    VerifyEmailRequest,
};
