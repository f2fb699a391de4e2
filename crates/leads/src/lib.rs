//! Bessa Leads Crate
//!
//! Lead-capture forms (contact enquiries, job applications and land offers),
//! their validation rules, and the client that posts them to the backend.
//!
//! # Core Types
//!
//! - [`ContactRequest`], [`RecruitmentApplication`], [`LandSubmission`] - Forms
//! - [`Validate`] - Collecting form validation
//! - [`LeadClient`] / [`LeadSink`] - Submission
//! - [`LeadError`] / [`FormErrors`] - Failures

pub mod client;
pub mod errors;
pub mod models;
pub mod validation;

pub use client::{LeadClient, LeadSink, DEFAULT_TIMEOUT};
pub use errors::{FieldError, FormErrors, LeadError};
pub use models::{ContactRequest, LandSubmission, LeadForm, RecruitmentApplication};
pub use validation::{is_valid_email, Validate};
