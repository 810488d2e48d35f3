use serde_json::Value;

pub const NO_ADDRESS_FOUND: &str = "No address found";
pub const ADDRESS_NOT_FOUND: &str = "Address not found";

/// Turns a Nominatim reverse response body into a single address line.
///
/// Preference order: an `error` member wins, then `display_name`, then a line
/// composed from the structured `address` parts.
pub fn extract_address(body: &Value) -> String {
    if body.get("error").is_some_and(is_truthy) {
        return NO_ADDRESS_FOUND.to_string();
    }

    if let Some(display_name) = body.get("display_name").and_then(text) {
        return display_name;
    }

    if let Some(parts) = body.get("address").filter(|v| is_truthy(v)) {
        let composed = compose_address(parts);
        if !composed.is_empty() {
            return composed;
        }
    }

    ADDRESS_NOT_FOUND.to_string()
}

fn compose_address(parts: &Value) -> String {
    let field = |name: &str| parts.get(name).and_then(text);

    let mut components = Vec::new();

    let house_number = field("house_number");
    let road = field("road");
    if house_number.is_some() || road.is_some() {
        let street = format!(
            "{} {}",
            house_number.unwrap_or_default(),
            road.unwrap_or_default()
        );
        components.push(street.trim().to_string());
    }

    let city = ["city", "town", "village", "hamlet"]
        .into_iter()
        .find_map(|name| field(name));
    if let Some(city) = city {
        components.push(city);
    }
    if let Some(state) = field("state").or_else(|| field("province")) {
        components.push(state);
    }
    if let Some(postcode) = field("postcode") {
        components.push(postcode);
    }
    if let Some(country) = field("country") {
        components.push(country);
    }

    components.join(", ")
}

fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

// null and false count as absent; numbers are rendered as text
fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
