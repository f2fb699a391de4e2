//! Property-based tests for listing validation and transformation.
//!
//! Generates wire-shaped listings (with optional fields randomly omitted or
//! nulled) and checks that validation accepts them and the transform
//! normalizes them consistently.

use bessa_catalog::{transform_listing, validate_listing, Listing};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

// =============================================================================
// Generators
// =============================================================================

/// How an optional field appears on the wire.
#[derive(Clone, Debug)]
enum Presence<T> {
    Absent,
    Null,
    Present(T),
}

fn arb_presence<T: Clone + std::fmt::Debug + 'static>(
    inner: impl Strategy<Value = T> + 'static,
) -> impl Strategy<Value = Presence<T>> {
    prop_oneof![
        1 => Just(Presence::Absent),
        1 => Just(Presence::Null),
        3 => inner.prop_map(Presence::Present),
    ]
}

fn insert<T: Into<Value>>(obj: &mut Map<String, Value>, key: &str, presence: Presence<T>) {
    match presence {
        Presence::Absent => {}
        Presence::Null => {
            obj.insert(key.to_string(), Value::Null);
        }
        Presence::Present(value) => {
            obj.insert(key.to_string(), value.into());
        }
    }
}

fn arb_words() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[A-Za-z ]{1,20}", 0..5)
}

/// Price in cents, sent either as a JSON number or a numeric string.
fn arb_price() -> impl Strategy<Value = (i64, bool)> {
    (0i64..1_000_000_000, any::<bool>())
}

fn price_value(cents: i64, as_string: bool) -> Value {
    let price = Decimal::new(cents, 2);
    if as_string {
        Value::String(price.to_string())
    } else {
        json!(cents as f64 / 100.0)
    }
}

/// Floor-plan id as either a string or an integer.
fn arb_plan_id() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9-]{1,12}".prop_map(Value::String),
        (0u64..100_000).prop_map(|n| json!(n)),
    ]
}

fn arb_floor_plan() -> impl Strategy<Value = Value> {
    (
        arb_plan_id(),
        "[A-Za-z ]{1,20}", // name
        "[a-z]{1,10}\\.jpg",
        "[0-9]{2,3} m²",
        0u32..10,
        0u32..10,
    )
        .prop_map(|(id, name, image, size, bedrooms, bathrooms)| {
            json!({
                "id": id,
                "name": name,
                "image": image,
                "size": size,
                "bedrooms": bedrooms,
                "bathrooms": bathrooms,
                "description": "Floor plan",
            })
        })
}

fn arb_agent() -> impl Strategy<Value = Value> {
    (
        "[A-Za-z ]{1,20}",
        "[a-z]{1,8}@[a-z]{1,8}\\.(com|dz)",
        proptest::option::of("[a-z]{1,10}\\.png"),
    )
        .prop_map(|(name, email, image)| {
            json!({
                "name": name,
                "title": "Sales Agent",
                "phone": "+213 555 0100",
                "email": email,
                "image": image,
            })
        })
}

/// A valid wire listing plus the generated price and floor-plan ids.
#[derive(Clone, Debug)]
struct Generated {
    wire: Value,
    price_cents: i64,
    plan_ids: Vec<Value>,
    has_agent: bool,
}

fn arb_listing() -> impl Strategy<Value = Generated> {
    (
        (
            "[a-z0-9]{1,10}",
            "[A-Za-z ]{1,30}",
            "[A-Za-z]{1,12}, [A-Za-z]{1,12}",
            arb_presence("[A-Za-z ]{0,40}"),
            arb_presence("[A-Za-z ]{0,40}"),
            arb_price(),
        ),
        (
            0.0f64..5_000.0,
            0u32..20,
            0u32..20,
            -90.0f64..=90.0,
            -180.0f64..=180.0,
        ),
        (
            arb_presence(arb_words()),
            arb_presence(arb_words()),
            arb_presence(arb_words()),
            arb_presence(arb_words()),
            arb_presence(arb_words()),
            arb_presence(arb_agent()),
            arb_presence(proptest::collection::vec(arb_floor_plan(), 0..4)),
        ),
    )
        .prop_map(
            |(
                (id, name, location, full_description, about_text, (cents, price_as_string)),
                (size, bedrooms, bathrooms, lat, lng),
                (gallery, tags, features, amenities, nearby_amenities, agent, floor_plans),
            )| {
                let mut obj = Map::new();
                obj.insert("id".into(), json!(id));
                obj.insert("name".into(), json!(name));
                obj.insert("location".into(), json!(location));
                obj.insert("description".into(), json!("A listing"));
                obj.insert("image".into(), json!("cover.jpg"));
                obj.insert("price".into(), price_value(cents, price_as_string));
                obj.insert("property_type".into(), json!("Apartment"));
                obj.insert("size".into(), json!(size));
                obj.insert("bedrooms".into(), json!(bedrooms));
                obj.insert("bathrooms".into(), json!(bathrooms));
                obj.insert("status".into(), json!("Ready to Move"));
                obj.insert("lat".into(), json!(lat));
                obj.insert("lng".into(), json!(lng));
                insert(&mut obj, "full_description", full_description);
                insert(&mut obj, "about_text", about_text);
                insert(&mut obj, "gallery", gallery);
                insert(&mut obj, "tags", tags);
                insert(&mut obj, "features", features);
                insert(&mut obj, "amenities", amenities);
                insert(&mut obj, "nearby_amenities", nearby_amenities);

                let has_agent = matches!(agent, Presence::Present(_));
                insert(&mut obj, "agent", agent);

                let plan_ids = match &floor_plans {
                    Presence::Present(plans) => plans.iter().map(|p| p["id"].clone()).collect(),
                    _ => Vec::new(),
                };
                insert(&mut obj, "floorPlans", floor_plans);

                Generated {
                    wire: Value::Object(obj),
                    price_cents: cents,
                    plan_ids,
                    has_agent,
                }
            },
        )
}

fn transform(generated: &Generated) -> Listing {
    let external = validate_listing(&generated.wire).expect("generated listing must validate");
    transform_listing(external)
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Every valid wire listing transforms without failure and keeps its
    /// scalar fields.
    #[test]
    fn prop_transform_is_total(generated in arb_listing()) {
        let listing = transform(&generated);
        prop_assert_eq!(listing.id.as_str(), generated.wire["id"].as_str().unwrap());
        prop_assert_eq!(listing.bedrooms as u64, generated.wire["bedrooms"].as_u64().unwrap());
        prop_assert_eq!(listing.map_position.lat, generated.wire["lat"].as_f64().unwrap());
        prop_assert_eq!(listing.map_position.lng, generated.wire["lng"].as_f64().unwrap());
    }

    /// Absent or null optional collections and texts come out empty, never missing.
    #[test]
    fn prop_optional_fields_default(generated in arb_listing()) {
        let listing = transform(&generated);
        let wire = &generated.wire;

        let expected_list = |key: &str| -> Vec<String> {
            wire.get(key)
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
                .unwrap_or_default()
        };
        prop_assert_eq!(&listing.gallery, &expected_list("gallery"));
        prop_assert_eq!(&listing.tags, &expected_list("tags"));
        prop_assert_eq!(&listing.features, &expected_list("features"));
        prop_assert_eq!(&listing.amenities, &expected_list("amenities"));
        prop_assert_eq!(&listing.nearby_amenities, &expected_list("nearby_amenities"));

        let expected_text = wire.get("full_description").and_then(Value::as_str).unwrap_or("");
        prop_assert_eq!(listing.full_description.as_str(), expected_text);

        // Serialized output always carries the list keys.
        let json = serde_json::to_value(&listing).unwrap();
        for key in ["gallery", "tags", "features", "amenities", "nearbyAmenities", "floorPlans"] {
            prop_assert!(json[key].is_array(), "{} missing from output", key);
        }
    }

    /// Price sent as a number or a numeric string yields the same decimal.
    #[test]
    fn prop_price_normalized(generated in arb_listing()) {
        let listing = transform(&generated);
        prop_assert_eq!(listing.price.normalize(), Decimal::new(generated.price_cents, 2).normalize());
    }

    /// Floor-plan ids always come out as strings, whatever the wire type.
    #[test]
    fn prop_floor_plan_ids_are_strings(generated in arb_listing()) {
        let listing = transform(&generated);
        prop_assert_eq!(listing.floor_plans.len(), generated.plan_ids.len());
        for (plan, wire_id) in listing.floor_plans.iter().zip(&generated.plan_ids) {
            let expected = match wire_id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            prop_assert_eq!(&plan.id, &expected);
        }
    }

    /// A missing or null agent yields an agent with every field empty.
    #[test]
    fn prop_agent_defaulted(generated in arb_listing()) {
        let listing = transform(&generated);
        if generated.has_agent {
            prop_assert!(!listing.agent.email.is_empty());
        } else {
            prop_assert_eq!(listing.agent.name.as_str(), "");
            prop_assert_eq!(listing.agent.title.as_str(), "");
            prop_assert_eq!(listing.agent.phone.as_str(), "");
            prop_assert_eq!(listing.agent.email.as_str(), "");
            prop_assert!(listing.agent.image.is_none());
        }
    }
}
