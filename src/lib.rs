//! Landing page and email waitlist for WakeWatch.
//!
//! Visitors leave an email in one of two forms on the page (a dialog, and a
//! section near the bottom); each submission becomes one row in a hosted
//! `email_signups` table.

pub mod configuration;
pub mod domain;
pub mod routes;
pub mod signup;
pub mod startup;
pub mod store_client;
pub mod telemetry;
pub mod utils;
