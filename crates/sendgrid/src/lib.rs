//! `SendGrid` transport for the Mailroom notification dispatcher.
//!
//! This crate implements the
//! [`EmailTransport`](mailroom_provider::EmailTransport) trait on top of the
//! [SendGrid v3 Mail Send API](https://www.twilio.com/docs/sendgrid/api-reference/mail-send/mail-send).
//! Messages carrying a remote template identifier are sent as dynamic
//! template mail; messages without one are sent as raw subject + content
//! mail.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use mailroom_sendgrid::{SendGridConfig, SendGridTransport};
//!
//! let config = SendGridConfig::new("SG.your-api-key");
//! let transport = SendGridTransport::new(config);
//! ```

pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use config::SendGridConfig;
pub use error::SendGridError;
pub use transport::SendGridTransport;
pub use types::{ContentPart, EmailAddress, MailSendRequest, Personalization};
