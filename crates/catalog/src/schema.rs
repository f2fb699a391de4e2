//! Listing schema validation.
//!
//! Checks decoded JSON against the projects API contract field by field:
//! - required scalars must be present and of the right type
//! - `price` may be a number or a numeric string and is coerced to [`Decimal`]
//! - optional collections default to empty when absent or `null`
//! - `agent` may be absent or `null`, but a present agent must be well formed
//! - floor-plan ids may be strings or numbers
//!
//! Every failing field is reported in a single [`ShapeError`].

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::errors::{FieldIssue, ShapeError};
use crate::models::{ExternalAgent, ExternalFloorPlan, ExternalListing, FloorPlanId};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

const REQUIRED: &str = "is required";
const EXPECTED_STRING: &str = "expected a string";
const EXPECTED_COUNT: &str = "expected a non-negative integer";

/// Validate a single listing object (single-item endpoint).
pub fn validate_listing(value: &Value) -> Result<ExternalListing, ShapeError> {
    let mut issues = Vec::new();
    match read_listing(value, "", &mut issues) {
        Some(listing) if issues.is_empty() => Ok(listing),
        _ => Err(ShapeError::new(issues)),
    }
}

/// Validate an array of listing objects (list endpoint).
///
/// All-or-nothing: one bad element fails the whole payload. Issue paths are
/// prefixed with the element index, e.g. `[2].agent.email`.
pub fn validate_listings(value: &Value) -> Result<Vec<ExternalListing>, ShapeError> {
    let items = value.as_array().ok_or_else(|| {
        ShapeError::new(vec![FieldIssue::new("", "expected an array of listings")])
    })?;

    let mut issues = Vec::new();
    let mut listings = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if let Some(listing) = read_listing(item, &format!("[{}]", index), &mut issues) {
            listings.push(listing);
        }
    }

    if issues.is_empty() {
        Ok(listings)
    } else {
        Err(ShapeError::new(issues))
    }
}

fn read_listing(value: &Value, prefix: &str, issues: &mut Vec<FieldIssue>) -> Option<ExternalListing> {
    let Some(obj) = value.as_object() else {
        issues.push(FieldIssue::new(prefix, "expected an object"));
        return None;
    };
    let before = issues.len();
    let mut fields = Fields { obj, prefix, issues };

    let listing = ExternalListing {
        id: fields.required_string("id"),
        name: fields.required_string("name"),
        location: fields.required_string("location"),
        description: fields.required_string("description"),
        full_description: fields.optional_string("full_description"),
        about_text: fields.optional_string("about_text"),
        image: fields.required_string("image"),
        gallery: fields.string_list("gallery"),
        price: fields.price("price"),
        property_type: fields.required_string("property_type"),
        size: fields.number("size"),
        bedrooms: fields.count("bedrooms"),
        bathrooms: fields.count("bathrooms"),
        status: fields.required_string("status"),
        tags: fields.string_list("tags"),
        features: fields.string_list("features"),
        amenities: fields.string_list("amenities"),
        nearby_amenities: fields.string_list("nearby_amenities"),
        lat: fields.coordinate("lat", 90.0),
        lng: fields.coordinate("lng", 180.0),
        agent: fields.agent("agent"),
        floor_plans: fields.floor_plans(),
    };

    (fields.issues.len() == before).then_some(listing)
}

/// Field accessor over one JSON object that records issues instead of failing fast.
///
/// Accessors return a placeholder on failure so that validation can keep
/// going; the caller discards the result when any issue was recorded.
struct Fields<'a> {
    obj: &'a Map<String, Value>,
    prefix: &'a str,
    issues: &'a mut Vec<FieldIssue>,
}

impl<'a> Fields<'a> {
    fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }

    fn fail(&mut self, key: &str, reason: impl Into<String>) {
        let path = self.path(key);
        self.issues.push(FieldIssue::new(path, reason));
    }

    /// Present and non-null value for `key`.
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.obj.get(key).filter(|v| !v.is_null())
    }

    fn required_string(&mut self, key: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                self.fail(key, EXPECTED_STRING);
                String::new()
            }
            None => {
                self.fail(key, REQUIRED);
                String::new()
            }
        }
    }

    fn optional_string(&mut self, key: &str) -> String {
        self.nullable_string(key).unwrap_or_default()
    }

    fn nullable_string(&mut self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.fail(key, EXPECTED_STRING);
                None
            }
            None => None,
        }
    }

    fn string_list(&mut self, key: &str) -> Vec<String> {
        let items = match self.get(key) {
            None => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.fail(key, "expected an array of strings");
                return Vec::new();
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => out.push(s.to_string()),
                None => self.fail(&format!("{}[{}]", key, index), EXPECTED_STRING),
            }
        }
        out
    }

    fn number(&mut self, key: &str) -> f64 {
        match self.get(key) {
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if v.is_finite() => v,
                _ => {
                    self.fail(key, "expected a finite number");
                    0.0
                }
            },
            Some(_) => {
                self.fail(key, "expected a number");
                0.0
            }
            None => {
                self.fail(key, REQUIRED);
                0.0
            }
        }
    }

    fn count(&mut self, key: &str) -> u32 {
        let value = match self.get(key) {
            Some(v) => v,
            None => {
                self.fail(key, REQUIRED);
                return 0;
            }
        };
        let parsed = match value {
            Value::Number(n) => as_count(n),
            _ => None,
        };
        match parsed {
            Some(n) => n,
            None => {
                self.fail(key, EXPECTED_COUNT);
                0
            }
        }
    }

    fn coordinate(&mut self, key: &str, limit: f64) -> f64 {
        let before = self.issues.len();
        let value = self.number(key);
        if self.issues.len() == before && value.abs() > limit {
            self.fail(key, format!("must be between -{} and {} degrees", limit, limit));
        }
        value
    }

    fn price(&mut self, key: &str) -> Decimal {
        let parsed = match self.get(key) {
            None => {
                self.fail(key, REQUIRED);
                return Decimal::ZERO;
            }
            Some(Value::Number(n)) => number_to_decimal(n),
            Some(Value::String(s)) => string_to_decimal(s),
            Some(_) => {
                self.fail(key, "expected a number or numeric string");
                return Decimal::ZERO;
            }
        };

        match parsed {
            Some(price) if price.is_sign_negative() && !price.is_zero() => {
                self.fail(key, "must not be negative");
                Decimal::ZERO
            }
            Some(price) => price,
            None => {
                self.fail(key, "not a numeric price");
                Decimal::ZERO
            }
        }
    }

    fn agent(&mut self, key: &str) -> Option<ExternalAgent> {
        let obj = match self.get(key)? {
            Value::Object(obj) => obj,
            _ => {
                self.fail(key, "expected an object");
                return None;
            }
        };

        let path = self.path(key);
        let mut fields = Fields {
            obj,
            prefix: &path,
            issues: &mut *self.issues,
        };
        let agent = ExternalAgent {
            name: fields.required_string("name"),
            title: fields.required_string("title"),
            phone: fields.required_string("phone"),
            email: fields.required_string("email"),
            image: fields.nullable_string("image"),
        };
        if !agent.email.is_empty() && !EMAIL_RE.is_match(&agent.email) {
            fields.fail("email", "not a valid email address");
        }
        Some(agent)
    }

    fn floor_plans(&mut self) -> Vec<ExternalFloorPlan> {
        // The backend sends camelCase here; accept the snake_case spelling as well.
        let key = if self.obj.contains_key("floorPlans") {
            "floorPlans"
        } else {
            "floor_plans"
        };
        let items = match self.get(key) {
            None => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.fail(key, "expected an array of floor plans");
                return Vec::new();
            }
        };

        let mut plans = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let path = format!("{}[{}]", self.path(key), index);
            let Some(obj) = item.as_object() else {
                self.issues.push(FieldIssue::new(path, "expected an object"));
                continue;
            };
            let mut fields = Fields {
                obj,
                prefix: &path,
                issues: &mut *self.issues,
            };
            let id = fields.floor_plan_id("id");
            plans.push(ExternalFloorPlan {
                id,
                name: fields.required_string("name"),
                image: fields.required_string("image"),
                size: fields.required_string("size"),
                bedrooms: fields.count("bedrooms"),
                bathrooms: fields.count("bathrooms"),
                description: fields.required_string("description"),
            });
        }
        plans
    }

    fn floor_plan_id(&mut self, key: &str) -> FloorPlanId {
        match self.get(key) {
            Some(Value::String(s)) => FloorPlanId::Text(s.clone()),
            Some(Value::Number(n)) => FloorPlanId::Number(n.clone()),
            Some(_) => {
                self.fail(key, "expected a string or number");
                FloorPlanId::Text(String::new())
            }
            None => {
                self.fail(key, REQUIRED);
                FloorPlanId::Text(String::new())
            }
        }
    }
}

fn as_count(n: &serde_json::Number) -> Option<u32> {
    if let Some(v) = n.as_u64() {
        return u32::try_from(v).ok();
    }
    // Whole floats such as `3.0` are accepted.
    n.as_f64()
        .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32)
}

fn number_to_decimal(n: &serde_json::Number) -> Option<Decimal> {
    if let Some(v) = n.as_i64() {
        return Some(Decimal::from(v));
    }
    if let Some(v) = n.as_u64() {
        return Some(Decimal::from(v));
    }
    // Parse the shortest decimal text of the float rather than its binary value.
    string_to_decimal(&n.to_string())
}

fn string_to_decimal(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}
