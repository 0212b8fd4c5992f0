use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::SignupEmail;

/// Tag stored with every row, identifying which page the signup came from
pub const SIGNUP_SOURCE: &str = "landing_page";

/// One row of the `email_signups` table. Built when the form is submitted,
/// sent once, then dropped.
#[derive(Serialize, Debug)]
pub struct SignupAttempt {
    pub email: String,
    // chrono serializes as RFC 3339
    pub created_at: DateTime<Utc>,
    pub source: &'static str,
}

impl SignupAttempt {
    pub fn new(email: &SignupEmail) -> Self {
        Self {
            email: email.as_ref().to_owned(),
            created_at: Utc::now(),
            source: SIGNUP_SOURCE,
        }
    }
}
