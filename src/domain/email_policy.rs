use serde::Deserialize;
use validator::ValidateEmail;

/// How much checking a submitted email gets before it is sent to the store.
///
/// `Native` mirrors what a browser does for `<input type="email">`, and
/// nothing more. `Strict` additionally runs the `validator` crate's check,
/// which rejects some addresses browsers let through (e.g. a local part
/// longer than 64 characters).
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailPolicy {
    #[default]
    Native,
    Strict,
}

impl EmailPolicy {
    pub fn accepts(
        self,
        email: &str,
    ) -> bool {
        match self {
            Self::Native => native_check(email),
            Self::Strict => native_check(email) && ValidateEmail::validate_email(&email.to_string()),
        }
    }
}

// https://html.spec.whatwg.org/multipage/input.html#valid-e-mail-address
fn native_check(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty() && local.chars().all(is_atext_or_dot);
    let domain_ok = !domain.is_empty() && domain.split('.').all(is_domain_label);
    local_ok && domain_ok
}

fn is_atext_or_dot(c: char) -> bool {
    c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c)
}

fn is_domain_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
