//! Mapping from validated wire listings to domain listings.
//!
//! Pure and total: every [`ExternalListing`] maps to exactly one [`Listing`].

use crate::models::{
    Agent, ExternalAgent, ExternalFloorPlan, ExternalListing, FloorPlan, GeoPosition, Listing,
};

/// Transform one validated listing into its domain form.
pub fn transform_listing(external: ExternalListing) -> Listing {
    Listing {
        id: external.id,
        name: external.name,
        location: external.location,
        description: external.description,
        full_description: external.full_description,
        about_text: external.about_text,
        image: external.image,
        gallery: external.gallery,
        price: external.price,
        property_type: external.property_type,
        size: external.size,
        bedrooms: external.bedrooms,
        bathrooms: external.bathrooms,
        status: external.status,
        tags: external.tags,
        features: external.features,
        amenities: external.amenities,
        nearby_amenities: external.nearby_amenities,
        floor_plans: external
            .floor_plans
            .into_iter()
            .map(FloorPlan::from)
            .collect(),
        map_position: GeoPosition::new(external.lat, external.lng),
        agent: external.agent.map(Agent::from).unwrap_or_default(),
    }
}

/// Transform a list of validated listings, preserving order.
pub fn transform_listings(external: Vec<ExternalListing>) -> Vec<Listing> {
    external.into_iter().map(transform_listing).collect()
}

impl From<ExternalListing> for Listing {
    fn from(external: ExternalListing) -> Self {
        transform_listing(external)
    }
}

impl From<ExternalAgent> for Agent {
    fn from(agent: ExternalAgent) -> Self {
        Self {
            name: agent.name,
            title: agent.title,
            phone: agent.phone,
            email: agent.email,
            // An empty image reference means "no image".
            image: agent.image.filter(|image| !image.is_empty()),
        }
    }
}

impl From<ExternalFloorPlan> for FloorPlan {
    fn from(plan: ExternalFloorPlan) -> Self {
        Self {
            id: plan.id.into_string(),
            name: plan.name,
            image: plan.image,
            size: plan.size,
            bedrooms: plan.bedrooms,
            bathrooms: plan.bathrooms,
            description: plan.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FloorPlanId;
    use rust_decimal_macros::dec;

    fn external() -> ExternalListing {
        ExternalListing {
            id: "azure-heights".to_string(),
            name: "Azure Heights".to_string(),
            location: "Oran, Algeria".to_string(),
            description: "Modern living spaces.".to_string(),
            full_description: "Premium residential development.".to_string(),
            about_text: "The future of residential living.".to_string(),
            image: "azure.jpg".to_string(),
            gallery: vec!["azure-1.jpg".to_string()],
            price: dec!(950000),
            property_type: "Apartment".to_string(),
            size: 150.0,
            bedrooms: 2,
            bathrooms: 2,
            status: "Under Construction".to_string(),
            tags: vec!["Sea View".to_string()],
            features: vec![],
            amenities: vec!["Rooftop pool".to_string()],
            nearby_amenities: vec!["5 minutes to the beach".to_string()],
            lat: 35.6971,
            lng: -0.6308,
            agent: None,
            floor_plans: vec![],
        }
    }

    fn plan(id: FloorPlanId) -> ExternalFloorPlan {
        ExternalFloorPlan {
            id,
            name: "Type A".to_string(),
            image: "a.svg".to_string(),
            size: "120 sqm".to_string(),
            bedrooms: 2,
            bathrooms: 1,
            description: "Open plan".to_string(),
        }
    }

    #[test]
    fn test_field_renames_and_position() {
        let listing = transform_listing(external());
        assert_eq!(listing.full_description, "Premium residential development.");
        assert_eq!(listing.about_text, "The future of residential living.");
        assert_eq!(listing.property_type, "Apartment");
        assert_eq!(listing.nearby_amenities, vec!["5 minutes to the beach"]);
        assert_eq!(listing.map_position, GeoPosition::new(35.6971, -0.6308));
        assert_eq!(listing.price, dec!(950000));
    }

    #[test]
    fn test_missing_agent_becomes_empty_record() {
        let listing = transform_listing(external());
        assert_eq!(listing.agent.name, "");
        assert_eq!(listing.agent.title, "");
        assert_eq!(listing.agent.phone, "");
        assert_eq!(listing.agent.email, "");
        assert_eq!(listing.agent.image, None);
    }

    #[test]
    fn test_present_agent_is_kept() {
        let mut source = external();
        source.agent = Some(ExternalAgent {
            name: "Karim Benali".to_string(),
            title: "Property Advisor".to_string(),
            phone: "+213 4 987 654".to_string(),
            email: "karim.b@bessarealestate.com".to_string(),
            image: Some(String::new()),
        });
        let listing = transform_listing(source);
        assert_eq!(listing.agent.name, "Karim Benali");
        assert_eq!(listing.agent.image, None);
    }

    #[test]
    fn test_floor_plan_ids_normalized_to_strings() {
        let mut source = external();
        source.floor_plans = vec![plan(FloorPlanId::from(7u64)), plan(FloorPlanId::from("7"))];
        let listing = transform_listing(source);
        assert_eq!(listing.floor_plans[0].id, "7");
        assert_eq!(listing.floor_plans[1].id, "7");
    }

    #[test]
    fn test_serialized_shape_is_camel_case() {
        let json = serde_json::to_value(transform_listing(external())).unwrap();
        for key in [
            "fullDescription",
            "aboutText",
            "propertyType",
            "nearbyAmenities",
            "floorPlans",
            "mapPosition",
            "agent",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["mapPosition"]["lat"], serde_json::json!(35.6971));
        assert_eq!(json["floorPlans"], serde_json::json!([]));
        assert_eq!(json["price"], serde_json::json!(950000.0));
    }

    #[test]
    fn test_list_order_preserved() {
        let mut second = external();
        second.id = "second".to_string();
        let listings = transform_listings(vec![external(), second]);
        assert_eq!(listings[0].id, "azure-heights");
        assert_eq!(listings[1].id, "second");
    }
}
