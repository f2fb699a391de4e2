//! Lead forms and the endpoints they are posted to.

use serde::{Deserialize, Serialize};

use crate::errors::FormErrors;
use crate::validation::{FormCheck, Validate};

/// A form that is posted as JSON to a fixed backend path.
pub trait LeadForm: Validate + Serialize + Send + Sync {
    /// Path under the backend base URL, with trailing slash.
    const ENDPOINT: &'static str;
    /// Short name used in logs.
    const KIND: &'static str;
}

/// General enquiry from the contact page.
///
/// Missing fields deserialize as empty so that validation, not decoding,
/// reports them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl Validate for ContactRequest {
    fn validate(&self) -> Result<(), FormErrors> {
        FormCheck::new()
            .min_len("name", &self.name, 3, "Full Name must be at least 3 characters")
            .email("email", &self.email, "Invalid email address")
            .min_len("phone", &self.phone, 10, "Phone number must be at least 10 digits")
            .min_len("subject", &self.subject, 3, "Subject must be at least 3 characters")
            .min_len("message", &self.message, 10, "Message must be at least 10 characters")
            .finish()
    }
}

impl LeadForm for ContactRequest {
    const ENDPOINT: &'static str = "/api/contact/";
    const KIND: &'static str = "contact";
}

/// Job application from the careers page. The CV upload is handled elsewhere.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecruitmentApplication {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub experience: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Validate for RecruitmentApplication {
    fn validate(&self) -> Result<(), FormErrors> {
        FormCheck::new()
            .required("firstName", &self.first_name, "First name is required")
            .required("lastName", &self.last_name, "Last name is required")
            .email("email", &self.email, "Invalid email")
            .required("phone", &self.phone, "Phone number is required")
            .required("position", &self.position, "Position is required")
            .required("experience", &self.experience, "Experience level is required")
            .finish()
    }
}

impl LeadForm for RecruitmentApplication {
    const ENDPOINT: &'static str = "/api/recruitment/";
    const KIND: &'static str = "recruitment";
}

/// Offer of a plot of land from the "sell your land" page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    /// Surface area as entered, e.g. "1200 m²".
    pub area: String,
    pub zoning: String,
    /// Asking price as entered.
    pub price: String,
    pub description: String,
    pub features: Vec<String>,
    pub agree_to_terms: bool,
}

impl Validate for LandSubmission {
    fn validate(&self) -> Result<(), FormErrors> {
        FormCheck::new()
            .required("firstName", &self.first_name, "First name is required")
            .required("lastName", &self.last_name, "Last name is required")
            .email("email", &self.email, "Invalid email address")
            .min_len("phone", &self.phone, 5, "Invalid phone number")
            .required("location", &self.location, "Location is required")
            .required("area", &self.area, "Area is required")
            .required("zoning", &self.zoning, "Zoning type is required")
            .required("price", &self.price, "Asking price is required")
            .accepted("agreeToTerms", self.agree_to_terms, "You must accept the terms")
            .finish()
    }
}

impl LeadForm for LandSubmission {
    const ENDPOINT: &'static str = "/api/submit-land/";
    const KIND: &'static str = "land";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactRequest {
        ContactRequest {
            name: "Amina Benali".to_string(),
            email: "amina@bessa.dz".to_string(),
            phone: "0555123456".to_string(),
            subject: "Viewing".to_string(),
            message: "I would like to visit the villa.".to_string(),
        }
    }

    fn land() -> LandSubmission {
        LandSubmission {
            first_name: "Karim".to_string(),
            last_name: "Haddad".to_string(),
            email: "karim@example.com".to_string(),
            phone: "05551".to_string(),
            location: "Blida".to_string(),
            area: "1200 m²".to_string(),
            zoning: "residential".to_string(),
            price: "45000000".to_string(),
            description: String::new(),
            features: vec!["road-access".to_string()],
            agree_to_terms: true,
        }
    }

    #[test]
    fn test_valid_contact() {
        assert!(contact().validate().is_ok());
    }

    #[test]
    fn test_contact_reports_every_field() {
        let form = ContactRequest {
            name: "Al".to_string(),
            email: "not-an-email".to_string(),
            phone: "0555".to_string(),
            subject: "Hi".to_string(),
            message: "Short".to_string(),
        };
        let errors = form.validate().unwrap_err();
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "phone", "subject", "message"]);
    }

    #[test]
    fn test_recruitment_message_optional() {
        let form = RecruitmentApplication {
            first_name: "Sara".to_string(),
            last_name: "Mansouri".to_string(),
            email: "sara@example.com".to_string(),
            phone: "0555".to_string(),
            position: "Sales Agent".to_string(),
            experience: "3-5 years".to_string(),
            message: None,
        };
        assert!(form.validate().is_ok());

        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["firstName"], "Sara");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_recruitment_blank_fields() {
        let errors = RecruitmentApplication::default().validate().unwrap_err();
        assert_eq!(errors.len(), 6);
        assert_eq!(errors.message("position"), Some("Position is required"));
    }

    #[test]
    fn test_land_requires_terms() {
        let form = LandSubmission {
            agree_to_terms: false,
            ..land()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message("agreeToTerms"), Some("You must accept the terms"));
    }

    #[test]
    fn test_land_wire_names() {
        assert!(land().validate().is_ok());
        let json = serde_json::to_value(land()).unwrap();
        assert_eq!(json["agreeToTerms"], true);
        assert_eq!(json["features"][0], "road-access");
    }
}
