//! Form-level validation for the mutation endpoints.
//!
//! Invalid input is reported field by field and nothing is persisted;
//! the handlers surface the errors inline with a 422.

use crate::MAX_FIELD_LENGTH;

/// A single field failure, e.g. `title: must not be empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn require(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "must not be empty"));
    }
}

fn bound(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.chars().count() > MAX_FIELD_LENGTH {
        errors.push(FieldError::new(
            field,
            format!("must be at most {MAX_FIELD_LENGTH} characters"),
        ));
    }
}

/// Validate a post create/edit submission.
pub fn post_input(title: &str, text: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    require(&mut errors, "title", title);
    bound(&mut errors, "title", title);
    require(&mut errors, "text", text);
    errors
}

/// Validate a comment create/edit submission.
pub fn comment_input(text: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    require(&mut errors, "text", text);
    errors
}

/// Validate a profile edit submission.
pub fn profile_input(username: &str, email: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    require(&mut errors, "username", username);
    bound(&mut errors, "username", username);
    if !email.contains('@') {
        errors.push(FieldError::new("email", "must be a valid email address"));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_post_input_passes() {
        assert!(post_input("A title", "Some text").is_empty());
    }

    #[test]
    fn empty_title_and_text_both_reported() {
        let errors = post_input("", "  ");
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "text"]);
    }

    #[test]
    fn overlong_title_rejected() {
        let title = "x".repeat(MAX_FIELD_LENGTH + 1);
        let errors = post_input(&title, "text");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn blank_comment_rejected() {
        assert_eq!(comment_input("   ").len(), 1);
        assert!(comment_input("fine").is_empty());
    }

    #[test]
    fn profile_requires_username_and_email_shape() {
        assert!(profile_input("ana", "ana@example.com").is_empty());
        let errors = profile_input("", "not-an-email");
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["username", "email"]);
    }
}
