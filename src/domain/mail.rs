//! Mail domain types and the Mailjet wire payload

use serde::{Deserialize, Serialize};

/// Email recipient with optional display name.
///
/// `cc` and `bcc` are accepted for forward compatibility but are not
/// forwarded to the provider; their presence only triggers a warning.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Recipient {
    pub email: String,
    pub name: Option<String>,
    pub cc: Option<String>,
    pub bcc: Option<String>,
}

impl Recipient {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Named sender profile, looked up by sender key from configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenderProfile {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Options for a single send operation
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Template key to resolve against the configured template identifiers
    pub template: Option<String>,
    /// Locale code; selects locale-suffixed template/subject variants
    pub language: Option<String>,
    /// Plain-text body
    pub text: Option<String>,
    /// HTML body
    pub html: Option<String>,
    /// Template variables, passed through verbatim to the provider
    pub data: serde_json::Map<String, serde_json::Value>,
    /// Subject line
    pub subject: Option<String>,
}

/// Recipient entry in the Mailjet wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRecipient {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Name")]
    pub name: String,
}

/// Mailjet v3 send payload.
///
/// Field names are fixed by the provider's API contract.
#[derive(Debug, Clone, Serialize)]
pub struct SendRequest {
    #[serde(rename = "FromEmail")]
    pub from_email: String,
    #[serde(rename = "FromName")]
    pub from_name: String,
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Text-part")]
    pub text_part: String,
    #[serde(rename = "Html-part")]
    pub html_part: String,
    #[serde(rename = "Mj-TemplateLanguage")]
    pub template_language: bool,
    #[serde(rename = "Vars")]
    pub vars: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "Recipients")]
    pub recipients: Vec<WireRecipient>,
    #[serde(rename = "Mj-TemplateID")]
    pub template_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_constructors() {
        let plain = Recipient::new("test@example.com");
        assert_eq!(plain.email, "test@example.com");
        assert!(plain.name.is_none());

        let named = Recipient::with_name("test@example.com", "Test User");
        assert_eq!(named.name.as_deref(), Some("Test User"));
        assert!(named.cc.is_none());
        assert!(named.bcc.is_none());
    }

    #[test]
    fn test_sender_profile_deserialize_partial() {
        let profile: SenderProfile = serde_json::from_str(r#"{"email": "info@example.com"}"#).unwrap();
        assert_eq!(profile.email, "info@example.com");
        assert_eq!(profile.name, "");
    }

    #[test]
    fn test_send_request_wire_field_names() {
        let request = SendRequest {
            from_email: "info@example.com".to_string(),
            from_name: "Info".to_string(),
            subject: "Betreff".to_string(),
            text_part: "Textpart".to_string(),
            html_part: "htmlpart".to_string(),
            template_language: true,
            vars: serde_json::Map::new(),
            recipients: vec![WireRecipient {
                email: "test@test.com".to_string(),
                name: "blubb".to_string(),
            }],
            template_id: "54321".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["FromEmail"], "info@example.com");
        assert_eq!(json["Subject"], "Betreff");
        assert_eq!(json["Text-part"], "Textpart");
        assert_eq!(json["Html-part"], "htmlpart");
        assert_eq!(json["Mj-TemplateID"], "54321");
        assert_eq!(json["Mj-TemplateLanguage"], true);
        assert_eq!(json["Vars"], serde_json::json!({}));
        assert_eq!(
            json["Recipients"],
            serde_json::json!([{"Email": "test@test.com", "Name": "blubb"}])
        );
    }

    #[test]
    fn test_send_options_default_is_empty() {
        let options = SendOptions::default();
        assert!(options.template.is_none());
        assert!(options.subject.is_none());
        assert!(options.data.is_empty());
    }
}
