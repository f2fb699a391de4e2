//! Field rules shared by the lead forms.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::FormErrors;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// A form that can check itself before submission.
pub trait Validate {
    /// Returns every failing field, not just the first.
    fn validate(&self) -> Result<(), FormErrors>;
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Collects field failures for one form.
#[derive(Default)]
pub(crate) struct FormCheck {
    errors: FormErrors,
}

impl FormCheck {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Non-blank after trimming.
    pub(crate) fn required(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(field, message);
        }
        self
    }

    /// At least `min` characters after trimming.
    pub(crate) fn min_len(&mut self, field: &str, value: &str, min: usize, message: &str) -> &mut Self {
        if value.trim().chars().count() < min {
            self.errors.push(field, message);
        }
        self
    }

    pub(crate) fn email(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if !is_valid_email(value) {
            self.errors.push(field, message);
        }
        self
    }

    pub(crate) fn accepted(&mut self, field: &str, value: bool, message: &str) -> &mut Self {
        if !value {
            self.errors.push(field, message);
        }
        self
    }

    pub(crate) fn finish(&mut self) -> Result<(), FormErrors> {
        std::mem::take(&mut self.errors).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("amina@bessa.dz"));
        assert!(is_valid_email(" amina@bessa.dz "));
        assert!(!is_valid_email("amina@bessa"));
        assert!(!is_valid_email("amina bessa.dz"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_min_len_counts_characters() {
        let result = FormCheck::new()
            .min_len("name", "Éli", 3, "too short")
            .min_len("subject", "  ab  ", 3, "too short")
            .finish();

        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].field, "subject");
    }
}
