//! Contact form state and submission.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::contact::dto::ContactRequest;
use crate::contact::repo_types::NewContactInquiry;
use crate::contact::services::{validate, InquiryError};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields (marked with *).";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const SUBMIT_FAILED_MESSAGE: &str = "Please try again or contact us directly via phone.";

/// Rejected locally; nothing was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields(Vec<&'static str>),
    #[error("{}", INVALID_EMAIL_MESSAGE)]
    InvalidEmail,
}

impl From<InquiryError> for FormError {
    fn from(e: InquiryError) -> Self {
        match e {
            InquiryError::MissingFields(fields) => FormError::MissingFields(fields),
            InquiryError::InvalidEmail => FormError::InvalidEmail,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    /// The transport failed. The cause is kept for logs; users see the retry prompt.
    #[error("{}", SUBMIT_FAILED_MESSAGE)]
    Transport(#[source] anyhow::Error),
}

/// Sends a validated inquiry, typically as `POST /api/contact`.
#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn send(&self, inquiry: &NewContactInquiry) -> anyhow::Result<()>;
}

/// Editable form fields. Blank optional fields are sent as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<NewContactInquiry, FormError> {
        let request = ContactRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: Some(self.phone.clone()),
            service: Some(self.service.clone()),
            message: self.message.clone(),
        };
        Ok(validate(request)?)
    }

    /// Validates, sends, and clears the form once the transport accepts it.
    /// On any error the fields are left as typed.
    pub async fn submit(&mut self, transport: &dyn ContactTransport) -> Result<(), SubmitError> {
        let inquiry = self.validate().map_err(|e| {
            warn!(error = %e, "contact form rejected");
            e
        })?;

        transport.send(&inquiry).await.map_err(|e| {
            warn!(error = %e, "contact submission failed");
            SubmitError::Transport(e)
        })?;

        info!(service = ?inquiry.service, "contact inquiry sent");
        *self = ContactForm::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        sent: Mutex<Vec<NewContactInquiry>>,
        fail: bool,
    }

    #[async_trait]
    impl ContactTransport for Recording {
        async fn send(&self, inquiry: &NewContactInquiry) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("connection refused");
            }
            self.sent.lock().unwrap().push(inquiry.clone());
            Ok(())
        }
    }

    fn filled() -> ContactForm {
        ContactForm {
            name: "Anita Rao".into(),
            email: "anita@example.in".into(),
            phone: String::new(),
            service: "repair".into(),
            message: "Laptop will not boot".into(),
        }
    }

    #[tokio::test]
    async fn empty_name_is_rejected_before_sending() {
        let transport = Recording::default();
        let mut form = ContactForm {
            name: String::new(),
            ..filled()
        };

        let err = form.submit(&transport).await.unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Invalid(FormError::MissingFields(ref f)) if f == &["name"]
        ));
        assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);
        assert!(transport.sent.lock().unwrap().is_empty());
        assert_eq!(form.email, "anita@example.in");
    }

    #[tokio::test]
    async fn successful_submit_sends_and_resets() {
        let transport = Recording::default();
        let mut form = filled();

        form.submit(&transport).await.unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].phone, None);
        assert_eq!(sent[0].service.as_deref(), Some("repair"));
        assert_eq!(form, ContactForm::default());
    }

    #[tokio::test]
    async fn transport_failure_keeps_fields_and_prompts_retry() {
        let transport = Recording {
            fail: true,
            ..Default::default()
        };
        let mut form = filled();

        let err = form.submit(&transport).await.unwrap_err();

        assert!(matches!(err, SubmitError::Transport(_)));
        assert_eq!(err.to_string(), SUBMIT_FAILED_MESSAGE);
        assert_eq!(form, filled());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let form = ContactForm {
            email: "anita".into(),
            ..filled()
        };
        assert_eq!(form.validate().unwrap_err(), FormError::InvalidEmail);
    }
}
