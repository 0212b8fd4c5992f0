//! The waitlist form shared by every surface of the landing page.
//!
//! A `SignupForm` only knows about its own fields and the `SignupStore` it
//! is handed; rendering lives in `routes::home`.

use crate::domain::EmailPolicy;
use crate::domain::SignupAttempt;
use crate::domain::SignupEmail;
use crate::store_client::SignupStore;
use crate::store_client::StoreError;

pub const SUCCESS_MESSAGE: &str = "Thanks for your interest! We'll keep you updated on WakeWatch.";
pub const STORE_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupPhase {
    Idle,
    Submitting,
    Success,
    Failed,
}

/// Why a submission never started. Neither case touches the form's state.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SubmitRefused {
    #[error("A submission is already in flight")]
    AlreadySubmitting,
    #[error("{0}")]
    InvalidEmail(String),
}

#[derive(Debug, Clone)]
pub struct SignupForm {
    email: String,
    is_submitting: bool,
    result_message: String,
    /// Only meaningful when `result_message` is non-empty
    is_success: bool,
    phase: SignupPhase,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            is_submitting: false,
            result_message: String::new(),
            is_success: false,
            phase: SignupPhase::Idle,
        }
    }
}

impl SignupForm {
    pub fn new() -> Self { Self::default() }

    /// A fresh form with the field already filled in, as when a browser
    /// posts it
    pub fn with_email(email: impl Into<String>) -> Self {
        let mut form = Self::new();
        form.input(email);
        form
    }

    pub fn email(&self) -> &str { &self.email }

    pub fn is_submitting(&self) -> bool { self.is_submitting }

    pub fn result_message(&self) -> &str { &self.result_message }

    pub fn is_success(&self) -> bool { self.is_success }

    pub fn phase(&self) -> SignupPhase { self.phase }

    /// Keystroke. The last result stays visible, but the form is idle again.
    pub fn input(
        &mut self,
        email: impl Into<String>,
    ) {
        self.email = email.into();
        if !self.is_submitting {
            self.phase = SignupPhase::Idle;
        }
    }

    /// First half of `submit`: check the email, mark the form as submitting,
    /// and build the row to send.
    pub fn begin_submit(
        &mut self,
        policy: EmailPolicy,
    ) -> Result<SignupAttempt, SubmitRefused> {
        if self.is_submitting {
            return Err(SubmitRefused::AlreadySubmitting);
        }
        let email =
            SignupEmail::parse(self.email.clone(), policy).map_err(SubmitRefused::InvalidEmail)?;

        self.is_submitting = true;
        self.result_message.clear();
        self.phase = SignupPhase::Submitting;
        Ok(SignupAttempt::new(&email))
    }

    /// Second half of `submit`: map the store's answer to a message.
    /// `is_submitting` is cleared last, whatever the outcome.
    pub fn finish_submit(
        &mut self,
        outcome: Result<(), StoreError>,
    ) -> SignupPhase {
        match outcome {
            Ok(()) => {
                self.result_message = SUCCESS_MESSAGE.to_owned();
                self.is_success = true;
                self.email.clear();
                self.phase = SignupPhase::Success;
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "signup failed"
                );
                self.result_message = match e {
                    StoreError::Rejected(_) => STORE_FAILURE_MESSAGE,
                    StoreError::Transport(_) => UNEXPECTED_FAILURE_MESSAGE,
                }
                .to_owned();
                self.is_success = false;
                self.phase = SignupPhase::Failed;
            }
        }
        self.is_submitting = false;
        self.phase
    }

    /// Send the current email to `store`, exactly once. Never retries.
    #[tracing::instrument(name = "Submitting waitlist signup", skip(self, store))]
    pub async fn submit<S: SignupStore>(
        &mut self,
        store: &S,
        policy: EmailPolicy,
    ) -> Result<SignupPhase, SubmitRefused> {
        let attempt = self.begin_submit(policy)?;
        let outcome = store.insert_signup(&attempt).await;
        Ok(self.finish_submit(outcome))
    }

    /// Show the generic failure for an email the policy refused. The field
    /// keeps what was typed, and nothing was sent.
    pub fn refuse_email(&mut self) {
        self.result_message = STORE_FAILURE_MESSAGE.to_owned();
        self.is_success = false;
        self.phase = SignupPhase::Failed;
    }

    /// Back to a blank form; used when the modal is dismissed
    pub fn reset(&mut self) {
        self.email.clear();
        self.result_message.clear();
        self.is_success = false;
        self.phase = SignupPhase::Idle;
    }
}
