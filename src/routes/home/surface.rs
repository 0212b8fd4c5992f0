use htmlescape::encode_minimal;
use serde::Deserialize;

use crate::signup::SignupForm;

pub const JOIN_LABEL: &str = "Join Waitlist";
pub const JOINING_LABEL: &str = "Joining...";

/// Where on the page a `SignupForm` is shown. Both surfaces post to the same
/// handler; they differ only in markup, and in what dismissing them does.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// "Get Early Access to WakeWatch" dialog
    Modal,
    /// "Get Early Access" section at the bottom of the page
    Pricing,
}

impl Surface {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modal => "modal",
            Self::Pricing => "pricing",
        }
    }

    /// Closing the dialog throws away whatever was typed and the last result;
    /// the pricing section has nothing to dismiss.
    pub fn dismiss(
        self,
        form: &mut SignupForm,
    ) {
        if self == Self::Modal {
            form.reset();
        }
    }

    pub fn render(
        self,
        form: &SignupForm,
    ) -> String {
        let fields = form_fields(self, form);
        match self {
            Self::Modal => format!(
                r#"<dialog open id="signup-modal">
  <h3>Get Early Access to WakeWatch</h3>
  <p>Be the first to know when WakeWatch launches. Enter your email to join our waitlist.</p>
  {fields}
</dialog>"#
            ),
            Self::Pricing => format!(
                r#"<section id="pricing">
  <h1>Get Early Access</h1>
  <p>Be the first to know when WakeWatch launches</p>
  {fields}
</section>"#
            ),
        }
    }
}

fn form_fields(
    surface: Surface,
    form: &SignupForm,
) -> String {
    let surface_id = surface.as_str();
    // quotes are escaped too, so this is safe inside a quoted attribute
    let email = encode_minimal(form.email());

    // only the dialog can be dismissed; `formnovalidate` lets it close even
    // with a half-typed address
    let close_button = match surface {
        Surface::Modal => {
            r#"<button type="submit" formaction="/waitlist/dismiss" formnovalidate>Close</button>"#
        }
        Surface::Pricing => "",
    };

    // a form is never rendered mid-submission, so the browser disables the
    // join button itself while the POST is pending. Only the join button
    // counts; the dialog's Close button submits the same form.
    let on_submit = format!(
        "var b = this.querySelector('[data-join]'); \
         if (event.submitter === b) {{ b.disabled = true; b.textContent = '{JOINING_LABEL}'; }}"
    );

    let message = match form.result_message() {
        "" => String::new(),
        msg => format!(
            r#"<div class="{}">{}</div>"#,
            if form.is_success() { "success" } else { "failure" },
            encode_minimal(msg)
        ),
    };

    format!(
        r#"<form action="/waitlist" method="post" onsubmit="{on_submit}">
    <input type="hidden" name="surface" value="{surface_id}" />
    <label for="{surface_id}-email">Email Address</label>
    <input type="email" id="{surface_id}-email" name="email" value="{email}" placeholder="Enter your email address" required />
    {message}
    <button type="submit" data-join>{JOIN_LABEL}</button>
    {close_button}
  </form>"#
    )
}
