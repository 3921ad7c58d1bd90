//! One-time passcode email.

use super::NotificationError;
use crate::config::MailConfig;
use minijinja::{Environment, Value, context};

const SUBJECT_TEMPLATE: &str = "otp_subject.txt";
const TEXT_TEMPLATE: &str = "otp_body.txt";
const HTML_TEMPLATE: &str = "otp_body.html";

const SUBJECT_SOURCE: &str = "{{ code }} is your {{ product_name }} verification code";

const TEXT_SOURCE: &str = "\
Hi {{ recipient_name }},

Your {{ product_name }} verification code is {{ code }}.
It expires in {{ valid_minutes }} minute{% if valid_minutes != 1 %}s{% endif %}.

If you did not request this code, you can ignore this email.

The {{ product_name }} team
";

const HTML_SOURCE: &str = r#"<!DOCTYPE html>
<html>
  <body style="font-family: sans-serif; color: #1f2937;">
    <p>Hi {{ recipient_name }},</p>
    <p>Your {{ product_name }} verification code is:</p>
    <p style="font-size: 28px; font-weight: bold; letter-spacing: 6px;">{{ code }}</p>
    <p>It expires in {{ valid_minutes }} minute{% if valid_minutes != 1 %}s{% endif %}.</p>
    <p>If you did not request this code, you can ignore this email.</p>
    <p>The {{ product_name }} team</p>
  </body>
</html>
"#;

const FALLBACK_RECIPIENT: &str = "there";

/// A validated numeric one-time passcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Shortest accepted code.
    pub const MIN_DIGITS: usize = 4;
    /// Longest accepted code.
    pub const MAX_DIGITS: usize = 8;

    /// Validates a passcode.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::InvalidCode`] unless the trimmed value is
    /// 4 to 8 ASCII digits.
    pub fn new(value: impl AsRef<str>) -> Result<Self, NotificationError> {
        let trimmed = value.as_ref().trim();
        let length_ok = (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&trimmed.len());
        if !length_ok || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(NotificationError::InvalidCode);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Input for one passcode email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEmail {
    recipient_name: String,
    code: OtpCode,
    valid_minutes: u32,
}

impl OtpEmail {
    /// Creates the email input. A blank recipient name is greeted
    /// generically.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::InvalidValidity`] for zero minutes.
    pub fn new(
        recipient_name: impl Into<String>,
        code: OtpCode,
        valid_minutes: u32,
    ) -> Result<Self, NotificationError> {
        if valid_minutes == 0 {
            return Err(NotificationError::InvalidValidity);
        }
        let name = recipient_name.into();
        let trimmed = name.trim();
        Ok(Self {
            recipient_name: if trimmed.is_empty() {
                FALLBACK_RECIPIENT.to_owned()
            } else {
                trimmed.to_owned()
            },
            code,
            valid_minutes,
        })
    }
}

/// A rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
    /// Plain-text body.
    pub text_body: String,
}

/// Renders passcode emails from built-in templates.
#[derive(Debug)]
pub struct OtpEmailRenderer {
    environment: Environment<'static>,
    product_name: String,
}

impl OtpEmailRenderer {
    /// Compiles the templates for the configured product.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::TemplateRender`] if a template fails to
    /// compile.
    pub fn new(config: &MailConfig) -> Result<Self, NotificationError> {
        let mut environment = Environment::new();
        for (name, source) in [
            (SUBJECT_TEMPLATE, SUBJECT_SOURCE),
            (TEXT_TEMPLATE, TEXT_SOURCE),
            (HTML_TEMPLATE, HTML_SOURCE),
        ] {
            environment
                .add_template(name, source)
                .map_err(|error| render_error(name, &error))?;
        }
        Ok(Self {
            environment,
            product_name: config.product_name.trim().to_owned(),
        })
    }

    /// Renders subject, HTML body and text body.
    ///
    /// The HTML body escapes interpolated values.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::TemplateRender`] if rendering fails.
    pub fn render(&self, email: &OtpEmail) -> Result<RenderedEmail, NotificationError> {
        let values = context! {
            product_name => &self.product_name,
            recipient_name => &email.recipient_name,
            code => email.code.as_str(),
            valid_minutes => email.valid_minutes,
        };
        let rendered = RenderedEmail {
            subject: self.render_one(SUBJECT_TEMPLATE, &values)?,
            html_body: self.render_one(HTML_TEMPLATE, &values)?,
            text_body: self.render_one(TEXT_TEMPLATE, &values)?,
        };
        tracing::debug!(template = "otp", product = %self.product_name, "email rendered");
        Ok(rendered)
    }

    fn render_one(&self, name: &'static str, values: &Value) -> Result<String, NotificationError> {
        self.environment
            .get_template(name)
            .and_then(|template| template.render(values))
            .map_err(|error| render_error(name, &error))
    }
}

fn render_error(template: &'static str, error: &minijinja::Error) -> NotificationError {
    NotificationError::TemplateRender {
        template,
        reason: error.to_string(),
    }
}
