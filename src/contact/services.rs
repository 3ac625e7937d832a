use lazy_static::lazy_static;
use regex::Regex;

use crate::contact::dto::ContactRequest;
use crate::contact::repo_types::NewContactInquiry;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InquiryError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("invalid email address")]
    InvalidEmail,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Checks required fields and email shape, then turns blank optional fields
/// into `None`. Everything else is kept as submitted.
pub fn validate(req: ContactRequest) -> Result<NewContactInquiry, InquiryError> {
    let missing: Vec<&'static str> = [
        ("name", &req.name),
        ("email", &req.email),
        ("message", &req.message),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if !missing.is_empty() {
        return Err(InquiryError::MissingFields(missing));
    }
    if !is_valid_email(req.email.trim()) {
        return Err(InquiryError::InvalidEmail);
    }

    Ok(NewContactInquiry {
        name: req.name,
        email: req.email,
        phone: blank_to_none(req.phone),
        service: blank_to_none(req.service),
        message: req.message,
    })
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
