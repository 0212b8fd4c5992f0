mod surface;
use actix_web::http::header::ContentType;
use actix_web::web;
use actix_web::HttpResponse;
use serde::Deserialize;
pub use surface::Surface;

use crate::signup::SignupForm;

#[derive(Deserialize)]
pub struct HomeQuery {
    signup: Option<String>,
}

/// `GET /`
///
/// `/?signup=open` renders the page with the signup dialog already open;
/// this is where the "Join Waitlist" links point.
pub async fn home(query: web::Query<HomeQuery>) -> HttpResponse {
    let blank = SignupForm::new();
    let modal = match query.signup.as_deref() {
        Some("open") => Some(&blank),
        _ => None,
    };
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(landing_page(modal, &blank))
}

/// The whole page. The dialog is only rendered (open) when `modal` is given.
pub fn landing_page(
    modal: Option<&SignupForm>,
    pricing: &SignupForm,
) -> String {
    let modal = modal
        .map(|form| Surface::Modal.render(form))
        .unwrap_or_default();
    let pricing = Surface::Pricing.render(pricing);

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>WakeWatch</title>
  </head>
  <body>
    <header>
      <h1>WakeWatch</h1>
      <a href="/?signup=open">Join Waitlist</a>
    </header>
    {modal}
    {pricing}
  </body>
</html>"#
    )
}
