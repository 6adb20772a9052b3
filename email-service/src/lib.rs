pub mod config;
pub mod error;
pub mod handlers;
pub mod mailer;
pub mod startup;
pub mod templates;
