mod email_policy;
mod signup_attempt;
mod signup_email;
pub use email_policy::EmailPolicy;
pub use signup_attempt::SignupAttempt;
pub use signup_email::SignupEmail;
