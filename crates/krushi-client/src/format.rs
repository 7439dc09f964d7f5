//! Display formatting for action results.
//!
//! [`parse_response`] first unwraps the payload to a string, then, if that
//! string is a JSON object, picks a Markdown template from [`RULES`] by
//! field presence. It is total: every input yields a string.

use serde_json::{Map, Value};

/// Recognised result shapes, in routing priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Weather,
    Diagnosis,
    Market,
    Scheme,
    Generic,
}

/// Ordered routing table: the first rule with any key present wins.
pub const RULES: &[(Shape, &[&str])] = &[
    (Shape::Weather, &["weatherForecast", "irrigationTips"]),
    (Shape::Diagnosis, &["disease", "confidence", "symptoms"]),
    (Shape::Market, &["marketData", "prices", "trends"]),
    (Shape::Scheme, &["schemes", "subsidies", "assistance"]),
];

/// Keys whose string value is shown as-is.
const TEXT_KEYS: &[&str] = &["response", "text", "message"];

/// Renders an action `result` payload as display text.
pub fn parse_response(result: &Value) -> String {
    let text = unwrap(result);
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(map)) => render(&map),
        _ => text,
    }
}

/// Picks the template for a JSON object.
pub fn classify(map: &Map<String, Value>) -> Shape {
    RULES
        .iter()
        .find(|(_, keys)| keys.iter().any(|k| map.contains_key(*k)))
        .map_or(Shape::Generic, |(shape, _)| *shape)
}

/// Raw string, then `result` (repeatedly), then `response`/`text`/`message`,
/// else pretty JSON.
fn unwrap(value: &Value) -> String {
    let mut current = value;
    loop {
        match current {
            Value::String(s) => return s.clone(),
            Value::Object(map) => {
                if let Some(inner) = map.get("result") {
                    current = inner;
                    continue;
                }
                if let Some(inner) = TEXT_KEYS.iter().find_map(|k| map.get(*k)) {
                    return scalar(inner);
                }
                return pretty(current);
            }
            other => return pretty(other),
        }
    }
}

fn render(map: &Map<String, Value>) -> String {
    let sections = match classify(map) {
        Shape::Weather => weather(map),
        Shape::Diagnosis => diagnosis(map),
        Shape::Market => market(map),
        Shape::Scheme => schemes(map),
        Shape::Generic => return generic(map),
    };
    sections.join("\n\n")
}

fn weather(map: &Map<String, Value>) -> Vec<String> {
    let mut out = vec!["## Weather Forecast".to_string()];
    if let Some(forecast) = present(map, "weatherForecast") {
        out.push(scalar(forecast));
    }
    push_list(&mut out, "### Irrigation Tips", map.get("irrigationTips"));
    push_list(&mut out, "### Alerts", map.get("alerts"));
    out
}

fn diagnosis(map: &Map<String, Value>) -> Vec<String> {
    let mut out = vec!["## Diagnosis".to_string()];
    let mut facts = Vec::new();
    if let Some(disease) = present(map, "disease") {
        facts.push(format!("**Disease:** {}", scalar(disease)));
    }
    if let Some(confidence) = present(map, "confidence") {
        facts.push(format!("**Confidence:** {}", percent(confidence)));
    }
    if !facts.is_empty() {
        out.push(facts.join("\n"));
    }
    push_list(&mut out, "### Symptoms", map.get("symptoms"));
    push_list(&mut out, "### Treatment", map.get("treatment"));
    push_list(&mut out, "### Prevention", map.get("prevention"));
    out
}

fn market(map: &Map<String, Value>) -> Vec<String> {
    let mut out = vec!["## Market Analysis".to_string()];
    if let Some(Value::Object(data)) = map.get("marketData") {
        let unit = present(data, "unit").map(scalar);
        let mut facts = Vec::new();
        for (key, label) in [("crop", "Crop"), ("market", "Market")] {
            if let Some(v) = present(data, key) {
                facts.push(format!("**{label}:** {}", scalar(v)));
            }
        }
        if let Some(price) = present(data, "currentPrice") {
            let price = match &unit {
                Some(unit) => format!("₹{} {unit}", scalar(price)),
                None => format!("₹{}", scalar(price)),
            };
            facts.push(format!("**Current Price:** {price}"));
        }
        if !facts.is_empty() {
            out.push(facts.join("\n"));
        }
    }
    if let Some(Value::Array(prices)) = map.get("prices") {
        let lines: Vec<String> = prices
            .iter()
            .map(|p| match (p.get("market"), p.get("price")) {
                (Some(m), Some(price)) => format!("- {}: ₹{}", scalar(m), scalar(price)),
                _ => format!("- {}", scalar(p)),
            })
            .collect();
        if !lines.is_empty() {
            out.push(format!("### Prices\n{}", lines.join("\n")));
        }
    }
    if let Some(trends) = present(map, "trends") {
        out.push(format!("### Trends\n{}", scalar(trends)));
    }
    if let Some(rec) = present(map, "recommendation") {
        out.push(format!("### Recommendation\n{}", scalar(rec)));
    }
    out
}

fn schemes(map: &Map<String, Value>) -> Vec<String> {
    let mut out = vec!["## Government Schemes".to_string()];
    if let Some(Value::Array(schemes)) = map.get("schemes") {
        for scheme in schemes {
            out.push(scheme_block(scheme));
        }
    }
    push_list(&mut out, "### Subsidies", map.get("subsidies"));
    push_list(&mut out, "### Assistance", map.get("assistance"));
    out
}

fn scheme_block(scheme: &Value) -> String {
    let Value::Object(s) = scheme else {
        return format!("- {}", scalar(scheme));
    };
    let mut lines = Vec::new();
    if let Some(name) = present(s, "name") {
        lines.push(format!("### {}", scalar(name)));
    }
    if let Some(desc) = present(s, "description") {
        lines.push(scalar(desc));
    }
    for (key, label) in [
        ("eligibility", "Eligibility"),
        ("benefits", "Benefits"),
        ("howToApply", "How to apply"),
    ] {
        if let Some(v) = present(s, key) {
            lines.push(format!("- **{label}:** {}", scalar(v)));
        }
    }
    if lines.is_empty() {
        return format!("- {}", scalar(scheme));
    }
    lines.join("\n")
}

fn generic(map: &Map<String, Value>) -> String {
    TEXT_KEYS
        .iter()
        .find_map(|k| map.get(*k))
        .map(scalar)
        .unwrap_or_else(|| pretty(&Value::Object(map.clone())))
}

/// `Some` unless the key is missing, null, or an empty string.
fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| match v {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    })
}

fn push_list(out: &mut Vec<String>, heading: &str, value: Option<&Value>) {
    let items: Vec<String> = match value {
        Some(Value::Array(items)) => items.iter().map(scalar).filter(|s| !s.is_empty()).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => Some(scalar(other)).filter(|s| !s.is_empty()).into_iter().collect(),
    };
    if items.is_empty() {
        return;
    }
    let bullets: Vec<String> = items.iter().map(|i| format!("- {i}")).collect();
    out.push(format!("{heading}\n{}", bullets.join("\n")));
}

/// Fractions in `[0, 1]` are scaled to percent; larger numbers are taken
/// as already being percentages.
fn percent(value: &Value) -> String {
    match value.as_f64() {
        Some(n) if n.is_finite() => {
            let pct = if n <= 1.0 { n * 100.0 } else { n };
            format!("{}%", pct.round())
        }
        _ => scalar(value),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn weather_outranks_diagnosis() {
        let m = obj(json!({"weatherForecast": "dry", "disease": "rust"}));
        assert_eq!(classify(&m), Shape::Weather);
    }

    #[test]
    fn diagnosis_outranks_market() {
        let m = obj(json!({"confidence": 0.4, "prices": []}));
        assert_eq!(classify(&m), Shape::Diagnosis);
    }

    #[test]
    fn market_outranks_scheme() {
        let m = obj(json!({"trends": "up", "schemes": []}));
        assert_eq!(classify(&m), Shape::Market);
    }

    #[test]
    fn scheme_and_generic() {
        assert_eq!(classify(&obj(json!({"assistance": []}))), Shape::Scheme);
        assert_eq!(classify(&obj(json!({"foo": 1}))), Shape::Generic);
    }

    #[test]
    fn percent_scaling() {
        assert_eq!(percent(&json!(0.82)), "82%");
        assert_eq!(percent(&json!(1)), "100%");
        assert_eq!(percent(&json!(75)), "75%");
        assert_eq!(percent(&json!("high")), "high");
    }

    #[test]
    fn whole_floats_drop_the_fraction() {
        assert_eq!(scalar(&json!(1850.0)), "1850");
        assert_eq!(scalar(&json!(12.5)), "12.5");
        assert_eq!(scalar(&json!(7)), "7");
    }

    #[test]
    fn unwrap_follows_nested_results() {
        assert_eq!(unwrap(&json!({"result": {"result": "deep"}})), "deep");
        assert_eq!(unwrap(&json!({"result": {"message": "m"}})), "m");
        assert_eq!(unwrap(&json!(null)), "null");
    }

    #[test]
    fn absent_subfields_are_omitted() {
        let out = parse_response(&json!({"disease": "Blight"}));
        assert!(out.contains("**Disease:** Blight"));
        assert!(!out.contains("Confidence"));
        assert!(!out.contains("Symptoms"));
    }

    #[test]
    fn scalar_list_value_becomes_single_bullet() {
        let out = parse_response(&json!({"weatherForecast": "Hot", "alerts": "Heatwave"}));
        assert!(out.contains("### Alerts\n- Heatwave"));
    }
}
