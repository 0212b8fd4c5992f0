// all integration tests live in one binary; see helpers.rs for setup
mod health_check;
mod helpers;
