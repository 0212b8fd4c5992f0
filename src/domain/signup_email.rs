use super::EmailPolicy;

#[derive(Debug, Clone)]
/// An email that has passed the configured `EmailPolicy`. Must be
/// instantiated with `SignupEmail::parse`.
pub struct SignupEmail(String);

impl SignupEmail {
    pub fn parse(
        email: String,
        policy: EmailPolicy,
    ) -> Result<Self, String> {
        match policy.accepts(&email) {
            true => Ok(Self(email)),
            false => Err(format!("Invalid email: {email:?}")),
        }
    }
}

impl AsRef<str> for SignupEmail {
    fn as_ref(&self) -> &str { &self.0 }
}
