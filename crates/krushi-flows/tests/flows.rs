//! End-to-end tests for the default registry with scripted backends.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use krushi_completion::{CompletionError, CompletionRequest, CompletionService};
use krushi_flows::{default_registry, CurrentWeather, WeatherError, WeatherProvider};
use krushi_mcp::{ActionRegistry, DispatchError, HandlerError};
use krushi_types::ActionKind;

/// Replays queued answers and records every request it sees.
#[derive(Default)]
struct Scripted {
    answers: Mutex<VecDeque<Result<String, CompletionError>>>,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl Scripted {
    fn answering(answers: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().map(|a| Ok(a.to_string())).collect()),
            seen: Mutex::default(),
        })
    }

    fn failing(err: CompletionError) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(VecDeque::from([Err(err)])),
            seen: Mutex::default(),
        })
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for Scripted {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.seen.lock().unwrap().push(request);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CompletionError::EmptyResponse))
    }
}

struct FixedWeather;

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<CurrentWeather, WeatherError> {
        if latitude == 0.0 && longitude == 0.0 {
            return Err(WeatherError::Status(503));
        }
        Ok(CurrentWeather {
            temperature_c: 29.5,
            humidity: 70.0,
            wind_speed_kmh: 8.0,
            precipitation_mm: 1.2,
            weather_code: 61,
            description: "Rain".into(),
        })
    }
}

fn registry(completion: Arc<Scripted>) -> ActionRegistry {
    default_registry(completion, Arc::new(FixedWeather)).expect("registry builds")
}

fn handler_message(err: DispatchError) -> String {
    match err {
        DispatchError::HandlerFailure { source, .. } => source.to_string(),
        other => panic!("expected handler failure, got {other:?}"),
    }
}

#[test]
fn default_registry_lists_every_action() {
    let reg = registry(Scripted::answering(&[]));
    let list = reg.list_actions();
    assert_eq!(
        list.flows,
        vec![
            "askAnything",
            "diagnoseCropDisease",
            "governmentSchemes",
            "marketAnalysis",
            "smartDiagnose",
            "translateText",
            "weatherTips",
        ]
    );
    assert_eq!(list.tools, vec!["getCurrentWeather", "supportedLanguages"]);
    assert_eq!(reg.kind_of("weatherTips"), Some(ActionKind::Flow));
    assert_eq!(reg.kind_of("getCurrentWeather"), Some(ActionKind::Tool));
}

#[tokio::test]
async fn ask_anything_returns_response_object() {
    let svc = Scripted::answering(&["  Sow after the first good rain.  "]);
    let reg = registry(svc.clone());
    let out = reg
        .invoke("askAnything", json!({ "text": "When to sow soybean?", "language": "hi" }))
        .await
        .unwrap();
    assert_eq!(out, json!({ "response": "Sow after the first good rain." }));

    let sent = svc.requests();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].prompt.contains("When to sow soybean?"));
    assert!(sent[0].prompt.ends_with("Answer in Hindi."));
    assert!(sent[0].system.is_some());
}

#[tokio::test]
async fn ask_anything_rejects_blank_text() {
    let svc = Scripted::answering(&["unused"]);
    let reg = registry(svc.clone());
    let err = reg.invoke("askAnything", json!({ "text": "   " })).await.unwrap_err();
    assert!(handler_message(err).contains("`text` must not be empty"));
    assert!(svc.requests().is_empty());
}

#[tokio::test]
async fn smart_diagnose_output_is_a_bare_string() {
    let reg = registry(Scripted::answering(&["Leaf blast. Spray tricyclazole."]));
    let raw = reg
        .dispatch("smartDiagnose", json!({ "text": "brown spots on rice leaves" }))
        .await
        .unwrap();
    assert_eq!(raw.into_raw(), json!("Leaf blast. Spray tricyclazole."));
}

#[tokio::test]
async fn smart_diagnose_is_wrapped_by_invoke() {
    let reg = registry(Scripted::answering(&["Leaf blast."]));
    let out = reg
        .invoke("smartDiagnose", json!({ "text": "brown spots" }))
        .await
        .unwrap();
    assert_eq!(out, json!({ "response": "Leaf blast." }));
}

#[tokio::test]
async fn smart_diagnose_needs_text_or_photo() {
    let reg = registry(Scripted::answering(&[]));
    let err = reg.invoke("smartDiagnose", json!({})).await.unwrap_err();
    assert!(handler_message(err).contains("photoDataUri"));
}

#[tokio::test]
async fn smart_diagnose_attaches_photo() {
    let svc = Scripted::answering(&["Looks healthy."]);
    let reg = registry(svc.clone());
    reg.invoke(
        "smartDiagnose",
        json!({ "text": "", "photoDataUri": "data:image/jpeg;base64,AAAA" }),
    )
    .await
    .unwrap();
    let sent = svc.requests();
    assert_eq!(sent[0].media.len(), 1);
    assert_eq!(sent[0].media[0].mime_type, "image/jpeg");
}

#[tokio::test]
async fn bad_photo_uri_is_invalid_input() {
    let reg = registry(Scripted::answering(&[]));
    let err = reg
        .invoke(
            "diagnoseCropDisease",
            json!({ "description": "wilting", "photoDataUri": "not-a-data-uri" }),
        )
        .await
        .unwrap_err();
    match err {
        DispatchError::HandlerFailure { source, .. } => {
            assert!(matches!(source, HandlerError::InvalidInput(_)));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn diagnose_parses_fenced_json_and_normalizes_confidence() {
    let answer = "```json\n{\"disease\":\"Late blight\",\"confidence\":85,\
                  \"symptoms\":[\"dark lesions\"],\"treatment\":[\"mancozeb\"],\
                  \"prevention\":[\"crop rotation\"]}\n```";
    let svc = Scripted::answering(&[answer]);
    let reg = registry(svc.clone());
    let out = reg
        .invoke(
            "diagnoseCropDisease",
            json!({ "description": "dark patches on potato leaves", "cropType": "potato" }),
        )
        .await
        .unwrap();
    assert_eq!(out["disease"], "Late blight");
    assert_eq!(out["confidence"], json!(0.85));
    assert_eq!(out["treatment"], json!(["mancozeb"]));

    let sent = svc.requests();
    assert!(sent[0].output_schema.is_some());
    assert!(sent[0].prompt.contains("potato"));
}

#[tokio::test]
async fn diagnose_rejects_unparseable_answer() {
    let reg = registry(Scripted::answering(&["I am not sure."]));
    let err = reg
        .invoke("diagnoseCropDisease", json!({ "description": "yellow leaves" }))
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::HandlerFailure { .. }));
}

#[tokio::test]
async fn market_analysis_returns_market_data() {
    let answer = json!({
        "marketData": { "crop": "Onion", "market": "Lasalgaon", "currentPrice": 1850.0 },
        "prices": [{ "market": "Pimpalgaon", "price": 1800.0 }],
        "trends": "Prices rising after rains",
        "recommendation": "Hold for two weeks"
    })
    .to_string();
    let reg = registry(Scripted::answering(&[&answer]));
    let out = reg
        .invoke("marketAnalysis", json!({ "crop": "onion", "location": "Nashik" }))
        .await
        .unwrap();
    assert_eq!(out["marketData"]["market"], "Lasalgaon");
    assert_eq!(out["marketData"]["unit"], "INR/quintal");
    assert_eq!(out["prices"][0]["price"], json!(1800.0));
    assert_eq!(out["recommendation"], "Hold for two weeks");
}

#[tokio::test]
async fn market_analysis_requires_location() {
    let reg = registry(Scripted::answering(&[]));
    let err = reg
        .invoke("marketAnalysis", json!({ "crop": "onion", "location": "" }))
        .await
        .unwrap_err();
    assert!(handler_message(err).contains("`location`"));
}

#[tokio::test]
async fn government_schemes_accepts_empty_input() {
    let answer = json!({
        "schemes": [{
            "name": "PM-KISAN",
            "description": "Income support",
            "eligibility": "Landholding farmers",
            "benefits": "Rs 6000 per year",
            "howToApply": "Apply at pmkisan.gov.in"
        }],
        "subsidies": ["Drip irrigation subsidy"],
        "assistance": ["Kisan call centre 1800-180-1551"]
    })
    .to_string();
    let reg = registry(Scripted::answering(&[&answer]));
    let out = reg.invoke("governmentSchemes", json!({})).await.unwrap();
    assert_eq!(out["schemes"][0]["name"], "PM-KISAN");
    assert_eq!(out["schemes"][0]["howToApply"], "Apply at pmkisan.gov.in");
    assert_eq!(out["subsidies"], json!(["Drip irrigation subsidy"]));
}

#[tokio::test]
async fn weather_tips_returns_forecast() {
    let answer = json!({
        "weatherForecast": "Light rain for three days",
        "irrigationTips": ["Skip irrigation until Friday"],
        "alerts": []
    })
    .to_string();
    let reg = registry(Scripted::answering(&[&answer]));
    let out = reg
        .invoke("weatherTips", json!({ "location": "Pune", "crop": "grapes" }))
        .await
        .unwrap();
    assert_eq!(out["weatherForecast"], "Light rain for three days");
    assert_eq!(out["irrigationTips"], json!(["Skip irrigation until Friday"]));
}

#[tokio::test]
async fn translate_calls_service_with_zero_temperature() {
    let svc = Scripted::answering(&["नमस्ते किसान\n"]);
    let reg = registry(svc.clone());
    let out = reg
        .invoke("translateText", json!({ "text": "Hello farmer", "targetLanguage": "hi" }))
        .await
        .unwrap();
    assert_eq!(out, json!({ "text": "नमस्ते किसान", "targetLanguage": "Hindi" }));
    let sent = svc.requests();
    assert_eq!(sent[0].temperature, Some(0.0));
    assert!(sent[0].prompt.contains("into Hindi"));
}

#[tokio::test]
async fn translate_same_language_skips_service() {
    let svc = Scripted::answering(&[]);
    let reg = registry(svc.clone());
    let out = reg
        .invoke(
            "translateText",
            json!({ "text": "Hello", "targetLanguage": "English", "sourceLanguage": "en" }),
        )
        .await
        .unwrap();
    assert_eq!(out["text"], "Hello");
    assert!(svc.requests().is_empty());
}

#[tokio::test]
async fn completion_failure_surfaces_as_handler_failure() {
    let reg = registry(Scripted::failing(CompletionError::RateLimited));
    let err = reg
        .invoke("askAnything", json!({ "text": "hi" }))
        .await
        .unwrap_err();
    assert_eq!(err.details().as_deref(), Some("rate limited"));
}

#[tokio::test]
async fn current_weather_tool_returns_conditions() {
    let reg = registry(Scripted::answering(&[]));
    let out = reg
        .invoke("getCurrentWeather", json!({ "latitude": 18.52, "longitude": 73.85 }))
        .await
        .unwrap();
    assert_eq!(out["temperatureC"], json!(29.5));
    assert_eq!(out["description"], "Rain");
}

#[tokio::test]
async fn current_weather_tool_validates_coordinates() {
    let reg = registry(Scripted::answering(&[]));
    let err = reg
        .invoke("getCurrentWeather", json!({ "latitude": 120.0, "longitude": 10.0 }))
        .await
        .unwrap_err();
    assert!(handler_message(err).contains("latitude"));
}

#[tokio::test]
async fn current_weather_provider_failure_is_reported() {
    let reg = registry(Scripted::answering(&[]));
    let err = reg
        .invoke("getCurrentWeather", json!({ "latitude": 0.0, "longitude": 0.0 }))
        .await
        .unwrap_err();
    assert!(handler_message(err).contains("503"));
}

#[tokio::test]
async fn supported_languages_lists_codes() {
    let reg = registry(Scripted::answering(&[]));
    let out: Value = reg.invoke("supportedLanguages", json!({})).await.unwrap();
    let languages = out["languages"].as_array().unwrap();
    assert!(languages.contains(&json!({ "code": "hi", "name": "Hindi" })));
    assert_eq!(languages[0], json!({ "code": "en", "name": "English" }));
}
