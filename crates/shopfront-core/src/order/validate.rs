//! Field validation for the order form.
//!
//! One canonical validator produces both the aggregate verdict and the
//! per-field error list, so the per-keystroke validation stream and the
//! submit-button enablement can never disagree.

use crate::order::form::{FieldError, OrderField, PaymentMethod};

pub(crate) struct Validation {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

/// Validate the full form. A field is checked for presence first and,
/// for email/phone, for format once present.
pub(crate) fn validate(
    payment: Option<PaymentMethod>,
    address: &str,
    email: &str,
    phone: &str,
) -> Validation {
    let mut errors = Vec::new();

    if address.trim().is_empty() {
        errors.push(FieldError::new(
            OrderField::Address,
            "delivery address is required",
        ));
    }
    if payment.is_none() {
        errors.push(FieldError::new(
            OrderField::Payment,
            "payment method is required",
        ));
    }
    if email.trim().is_empty() {
        errors.push(FieldError::new(OrderField::Email, "email is required"));
    } else if !email_format_ok(email) {
        errors.push(FieldError::new(OrderField::Email, "email format is invalid"));
    }
    if phone.trim().is_empty() {
        errors.push(FieldError::new(OrderField::Phone, "phone is required"));
    } else if !phone_format_ok(phone) {
        errors.push(FieldError::new(OrderField::Phone, "phone format is invalid"));
    }

    Validation {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Structural email check: exactly one `@`, non-empty local part, and a
/// domain containing a dot, with no whitespace anywhere.
fn email_format_ok(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain.split('.').count() >= 2 && domain.split('.').all(|label| !label.is_empty())
}

/// Phone check: optional leading `+`, then at least seven characters
/// drawn from digits, spaces, dashes, and parentheses.
fn phone_format_ok(phone: &str) -> bool {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    rest.chars().count() >= 7
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
}
