use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An email address as the `SendGrid` v3 API represents it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAddress {
    /// The address itself, e.g. `"parent@example.com"`.
    pub email: String,
}

impl EmailAddress {
    /// Wraps a raw address string.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// A single personalization block: one recipient set plus its
/// template substitution data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Personalization {
    /// Recipients of this personalization.
    pub to: Vec<EmailAddress>,

    /// Substitution data handed to the remote dynamic template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_template_data: Option<Map<String, Value>>,
}

/// One body part of a non-templated message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPart {
    /// MIME type: `"text/plain"` or `"text/html"`.
    #[serde(rename = "type")]
    pub content_type: String,

    /// The body text for this part.
    pub value: String,
}

impl ContentPart {
    /// A `text/plain` body part.
    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            content_type: "text/plain".into(),
            value: value.into(),
        }
    }

    /// A `text/html` body part.
    #[must_use]
    pub fn html(value: impl Into<String>) -> Self {
        Self {
            content_type: "text/html".into(),
            value: value.into(),
        }
    }
}

/// Request body for the `SendGrid` v3 Mail Send API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailSendRequest {
    /// Sender address.
    pub from: EmailAddress,

    /// Personalization blocks (always exactly one for dispatch sends).
    pub personalizations: Vec<Personalization>,

    /// Subject line (content mode only; templates carry their own).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Remote dynamic template identifier (template mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,

    /// Inline body parts (content mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<ContentPart>>,
}

impl MailSendRequest {
    /// Builds a template-mode request. An empty substitution map is
    /// omitted from the wire payload entirely.
    #[must_use]
    pub fn template(
        from: EmailAddress,
        to: EmailAddress,
        template_id: impl Into<String>,
        data: Map<String, Value>,
    ) -> Self {
        Self {
            from,
            personalizations: vec![Personalization {
                to: vec![to],
                dynamic_template_data: if data.is_empty() { None } else { Some(data) },
            }],
            subject: None,
            template_id: Some(template_id.into()),
            content: None,
        }
    }

    /// Builds a content-mode request with an explicit subject and body parts.
    #[must_use]
    pub fn content(
        from: EmailAddress,
        to: EmailAddress,
        subject: impl Into<String>,
        parts: Vec<ContentPart>,
    ) -> Self {
        Self {
            from,
            personalizations: vec![Personalization {
                to: vec![to],
                dynamic_template_data: None,
            }],
            subject: Some(subject.into()),
            template_id: None,
            content: Some(parts),
        }
    }
}
