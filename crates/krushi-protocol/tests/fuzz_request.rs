//! Property-based tests for action request deserialization.
//!
//! The envelope parser must never panic on arbitrary input, and the legacy
//! `method`/`params` spelling must resolve exactly like `action`/`input`.

use krushi_protocol::ActionRequest;
use proptest::prelude::*;
use serde_json::json;

proptest! {
    /// Arbitrary strings never cause a panic.
    #[test]
    fn no_panic_on_arbitrary_json(input in "\\PC{0,256}") {
        let _ = serde_json::from_str::<ActionRequest>(&input);
    }

    /// Alias spelling resolves to the same action and payload.
    #[test]
    fn alias_equivalence(
        name in "[a-zA-Z][a-zA-Z0-9_]{0,31}",
        text in "\\PC{0,64}",
    ) {
        let preferred: ActionRequest =
            serde_json::from_value(json!({"action": name, "input": {"text": text}}))
                .expect("test: preferred request");
        let legacy: ActionRequest =
            serde_json::from_value(json!({"method": name, "params": {"text": text}}))
                .expect("test: legacy request");
        prop_assert_eq!(preferred.action_name(), legacy.action_name());
        prop_assert_eq!(preferred.payload(), legacy.payload());
    }

    /// Bodies without any action spelling resolve to no action.
    #[test]
    fn missing_action_never_resolves(key in "[a-z]{1,8}") {
        prop_assume!(key != "action" && key != "method");
        let req: ActionRequest = serde_json::from_value(json!({ key: "x" }))
            .expect("test: unknown fields are ignored");
        prop_assert!(req.action_name().is_none());
    }
}
