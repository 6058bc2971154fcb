use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single outbound e-mail, ready for provider dispatch.
///
/// Template fields and inline-content fields can coexist on one message:
/// dispatch prefers the remote template when the marketing provider can take
/// it and keeps the inline subject and HTML as the fallback body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient e-mail address.
    pub to: String,

    /// Subject line. Required for any inline-content send.
    pub subject: Option<String>,

    /// HTML body. Required for any inline-content send.
    pub html_body: Option<String>,

    /// Optional plain-text alternative body.
    pub text_body: Option<String>,

    /// Sender override. When absent, the dispatcher fills in its configured
    /// sender address before the message reaches a transport.
    pub from: Option<String>,

    /// Remote template identifier for the marketing provider.
    pub template_id: Option<String>,

    /// Variables substituted into the remote template.
    #[serde(default)]
    pub template_data: Map<String, Value>,
}

impl EmailMessage {
    /// Create a message addressed to a single recipient.
    #[must_use]
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: None,
            html_body: None,
            text_body: None,
            from: None,
            template_id: None,
            template_data: Map::new(),
        }
    }

    /// Set the subject line.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the HTML body.
    #[must_use]
    pub fn with_html_body(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }

    /// Set the plain-text body.
    #[must_use]
    pub fn with_text_body(mut self, text: impl Into<String>) -> Self {
        self.text_body = Some(text.into());
        self
    }

    /// Set the sender address.
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set the remote template identifier.
    #[must_use]
    pub fn with_template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Set the template variable map.
    #[must_use]
    pub fn with_template_data(mut self, data: Map<String, Value>) -> Self {
        self.template_data = data;
        self
    }

    /// Whether this message references a remote template.
    #[must_use]
    pub fn has_template(&self) -> bool {
        self.template_id.is_some()
    }

    /// Whether this message carries everything an inline-content send needs.
    #[must_use]
    pub fn has_inline_content(&self) -> bool {
        self.subject.is_some() && self.html_body.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_creation() {
        let msg = EmailMessage::new("parent@example.com");
        assert_eq!(msg.to, "parent@example.com");
        assert!(msg.subject.is_none());
        assert!(msg.template_data.is_empty());
        assert!(!msg.has_template());
        assert!(!msg.has_inline_content());
    }

    #[test]
    fn message_with_inline_content() {
        let msg = EmailMessage::new("parent@example.com")
            .with_subject("Hello")
            .with_html_body("<p>Hi</p>");
        assert!(msg.has_inline_content());
        assert!(!msg.has_template());
    }

    #[test]
    fn subject_alone_is_not_inline_content() {
        let msg = EmailMessage::new("parent@example.com").with_subject("Hello");
        assert!(!msg.has_inline_content());
    }

    #[test]
    fn message_with_template() {
        let mut data = Map::new();
        data.insert("name".into(), Value::String("Ada".into()));
        let msg = EmailMessage::new("parent@example.com")
            .with_template_id("d-12345")
            .with_template_data(data);
        assert!(msg.has_template());
        assert_eq!(msg.template_id.as_deref(), Some("d-12345"));
        assert_eq!(msg.template_data["name"], Value::String("Ada".into()));
    }

    #[test]
    fn message_serde_roundtrip() {
        let msg = EmailMessage::new("parent@example.com")
            .with_subject("Hello")
            .with_html_body("<p>Hi</p>")
            .with_from("no-reply@storytailor.app");
        let json = serde_json::to_string(&msg).unwrap();
        let back: EmailMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to, msg.to);
        assert_eq!(back.subject, msg.subject);
        assert_eq!(back.from, msg.from);
    }
}
