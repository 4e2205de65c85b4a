use crate::declarations::{HydratedFlag, HydratedSelector, RawConfig, RawHydratedFlag};

/// `None` when the user turned the hydrated flag off.
pub fn validate_hydrated(config: &RawConfig) -> Option<HydratedFlag> {
    let input = match &config.hydrated_flag {
        Some(RawHydratedFlag::Disabled) => return None,
        Some(RawHydratedFlag::Settings(input)) => input.clone(),
        None => Default::default(),
    };
    let non_empty = |value: Option<String>, default_value: &str| {
        value
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default_value.to_string())
    };

    Some(HydratedFlag {
        name: non_empty(input.name, "hydrated"),
        selector: match input.selector.as_deref() {
            Some("attribute") => HydratedSelector::Attribute,
            _ => HydratedSelector::Class,
        },
        property: non_empty(input.property, "visibility"),
        initial_value: input.initial_value.unwrap_or_else(|| "hidden".to_string()),
        hydrated_value: input.hydrated_value.unwrap_or_else(|| "inherit".to_string()),
    })
}
