use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;
use serde::Deserialize;

use super::home::landing_page;
use super::home::Surface;
use crate::domain::EmailPolicy;
use crate::signup::SignupForm;
use crate::signup::SignupPhase;
use crate::signup::SubmitRefused;
use crate::store_client::StoreClient;

/// Posted by both surfaces; `surface` comes from a hidden input
#[derive(Deserialize)]
pub struct WaitlistFormData {
    email: String,
    surface: Surface,
}

/// Render the page with `form` shown on `surface` (the dialog is open iff
/// `surface` is the modal), and a blank form everywhere else
fn page_response(
    status: StatusCode,
    surface: Surface,
    form: &SignupForm,
    modal_open: bool,
) -> HttpResponse {
    let blank = SignupForm::new();
    let body = match surface {
        Surface::Modal => landing_page(modal_open.then_some(form), &blank),
        Surface::Pricing => landing_page(None, form),
    };
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

/// Each request gets a fresh form, so `AlreadySubmitting` cannot come out of
/// a request; it is lumped in with the failures.
fn status_for(outcome: &Result<SignupPhase, SubmitRefused>) -> StatusCode {
    match outcome {
        Ok(SignupPhase::Success) => StatusCode::OK,
        Err(SubmitRefused::InvalidEmail(_)) => StatusCode::BAD_REQUEST,
        Ok(_) | Err(SubmitRefused::AlreadySubmitting) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `POST /waitlist`
///
/// One insert per request, no retries. The page is re-rendered with the
/// outcome: 200 on success, 400 if the email is refused before anything is
/// sent, 500 if the store rejected the row or could not be reached.
#[tracing::instrument(
    name = "Joining waitlist",
    skip(form, store, policy),
    fields(
        signup_email = %form.email,
        surface = ?form.surface,
    )
)]
pub async fn join_waitlist(
    form: web::Form<WaitlistFormData>,
    store: web::Data<StoreClient>,
    policy: web::Data<EmailPolicy>,
) -> HttpResponse {
    let WaitlistFormData { email, surface } = form.into_inner();
    let mut signup = SignupForm::with_email(email);

    let outcome = signup.submit(store.get_ref(), **policy).await;
    if let Err(SubmitRefused::InvalidEmail(e)) = &outcome {
        // the browser only blocks what its own check rejects; anything past
        // that (e.g. under the strict policy) needs a visible answer
        tracing::info!("refusing signup: {e}");
        signup.refuse_email();
    }

    page_response(status_for(&outcome), surface, &signup, true)
}

/// `POST /waitlist/dismiss`
///
/// Close button of the dialog. Nothing is sent to the store.
pub async fn dismiss_signup(form: web::Form<WaitlistFormData>) -> HttpResponse {
    let WaitlistFormData { email, surface } = form.into_inner();
    let mut signup = SignupForm::with_email(email);
    surface.dismiss(&mut signup);
    page_response(StatusCode::OK, surface, &signup, false)
}
