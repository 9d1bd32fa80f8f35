//! Contact form validation and simulated delivery.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::ContactConfig;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

/// Correctable problem with one field, shown next to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldError {
    pub field: ContactField,
    pub message: &'static str,
}

/// Checks one trimmed field value.
pub fn validate_field(field: ContactField, raw: &str) -> Result<(), FieldError> {
    let value = raw.trim();
    let length = value.chars().count();
    let message = match field {
        ContactField::Name if length < 2 => "Name must be at least 2 characters long",
        ContactField::Email if !is_email_shaped(value) => "Please enter a valid email address",
        ContactField::Subject if length > 0 && length < 3 => {
            "Subject must be at least 3 characters long"
        }
        ContactField::Message if length < 10 => "Message must be at least 10 characters long",
        _ => return Ok(()),
    };
    Err(FieldError { field, message })
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside the
/// domain with text on both sides.
fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    /// Every failing field, in form order.
    pub fn validate(&self) -> Vec<FieldError> {
        ContactField::ALL
            .into_iter()
            .filter_map(|field| validate_field(field, self.value(field)).err())
            .collect()
    }

    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmissionOutcome {
    Delivered(ContactForm),
    Rejected(Vec<FieldError>),
    /// Another submission has not finished yet; nothing was sent.
    AlreadyInFlight,
}

/// Simulated form delivery allowing at most one submission in flight.
#[derive(Debug)]
pub struct ContactSubmitter {
    delay: Duration,
    in_flight: AtomicBool,
}

impl ContactSubmitter {
    pub fn new(config: &ContactConfig) -> Self {
        Self {
            delay: config.submit_delay(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(&self, form: &ContactForm) -> SubmissionOutcome {
        let errors = form.validate();
        if !errors.is_empty() {
            let fields: Vec<&str> = errors.iter().map(|error| error.field.as_str()).collect();
            tracing::debug!(failed_fields = ?fields, "contact form rejected");
            return SubmissionOutcome::Rejected(errors);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("ignoring contact submission while another is in flight");
            return SubmissionOutcome::AlreadyInFlight;
        }
        let _slot = InFlightSlot(&self.in_flight);

        tokio::time::sleep(self.delay).await;
        tracing::info!("contact form delivered");
        SubmissionOutcome::Delivered(form.trimmed())
    }
}

/// Releases the in-flight flag even when the submitting future is dropped.
struct InFlightSlot<'a>(&'a AtomicBool);

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
