//! Unit tests for the voice-enrollment module.
//!
//! These tests do not touch the network. Request/response flows against a
//! mock server live in tests/enrollment_integration.rs.

use super::*;
use serde_json::{Value, json};

// =============================================================================
// Wire Body Tests
// =============================================================================

mod wire_body_tests {
    use super::*;

    fn sample_creation() -> CreationRequest {
        CreationRequest::new("testvoice", "https://oss.example.com/voice_cloning/sample.m4a")
            .with_target_model("cosyvoice-v3-plus")
            .with_language_hints(["zh"])
    }

    #[test]
    fn test_creation_body_fields() {
        let request = sample_creation();
        let body: Value =
            serde_json::to_value(EnrollmentRequest::create(&request)).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "voice-enrollment",
                "input": {
                    "action": "create_voice",
                    "target_model": "cosyvoice-v3-plus",
                    "prefix": "testvoice",
                    "url": "https://oss.example.com/voice_cloning/sample.m4a",
                    "language_hints": ["zh"]
                }
            })
        );
    }

    #[test]
    fn test_creation_body_field_order() {
        let request = sample_creation();
        let json = serde_json::to_string(&EnrollmentRequest::create(&request)).unwrap();

        let positions: Vec<usize> = [
            "\"model\"",
            "\"input\"",
            "\"action\"",
            "\"target_model\"",
            "\"prefix\"",
            "\"url\"",
            "\"language_hints\"",
        ]
        .iter()
        .map(|key| json.find(key).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn test_creation_body_passes_fields_through_untouched() {
        let request = CreationRequest {
            target_model: " cosyvoice-v2 ".to_string(),
            prefix: "my voice!".to_string(),
            url: "https://example.com/a b.m4a?sig=x%2By&t=1".to_string(),
            language_hints: vec!["en".to_string(), "zh".to_string(), "".to_string()],
        };
        let body: Value =
            serde_json::to_value(EnrollmentRequest::create(&request)).unwrap();
        let input = &body["input"];

        assert_eq!(input["target_model"], " cosyvoice-v2 ");
        assert_eq!(input["prefix"], "my voice!");
        assert_eq!(input["url"], "https://example.com/a b.m4a?sig=x%2By&t=1");
        assert_eq!(input["language_hints"], json!(["en", "zh", ""]));
    }

    #[test]
    fn test_creation_body_unicode_and_empty_hints() {
        let request = CreationRequest::new("语音", "https://example.com/声音.m4a")
            .with_language_hints(Vec::<String>::new());
        let body: Value =
            serde_json::to_value(EnrollmentRequest::create(&request)).unwrap();

        assert_eq!(body["input"]["prefix"], "语音");
        assert_eq!(body["input"]["url"], "https://example.com/声音.m4a");
        assert_eq!(body["input"]["language_hints"], json!([]));
    }

    #[test]
    fn test_creation_defaults() {
        let request = CreationRequest::new("p", "https://example.com/a.wav");
        assert_eq!(request.target_model, DEFAULT_TARGET_MODEL);
        assert_eq!(request.language_hints, vec!["zh".to_string()]);
    }

    #[test]
    fn test_query_body() {
        let query = StatusQuery::new("cosyvoice-v3-plus-voice-ac11b52dd7104ba1");
        let request = EnrollmentRequest::query(&query);
        assert_eq!(request.action(), VoiceAction::QueryVoice);

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"model":"voice-enrollment","input":{"action":"query_voice","voice_id":"cosyvoice-v3-plus-voice-ac11b52dd7104ba1"}}"#
        );
    }

    #[test]
    fn test_list_body_with_prefix() {
        let query = ListQuery {
            prefix: Some("grandma".to_string()),
            page_index: 2,
            page_size: 10,
        };
        let json = serde_json::to_string(&EnrollmentRequest::list(&query)).unwrap();
        assert_eq!(
            json,
            r#"{"model":"voice-enrollment","input":{"action":"list_voice","prefix":"grandma","page_index":2,"page_size":10}}"#
        );
    }

    #[test]
    fn test_list_body_without_prefix() {
        let body: Value =
            serde_json::to_value(EnrollmentRequest::list(&ListQuery::default())).unwrap();
        assert_eq!(
            body["input"],
            json!({"action": "list_voice", "page_index": 0, "page_size": 100})
        );
        assert!(body["input"].get("prefix").is_none());
    }

    #[test]
    fn test_delete_body() {
        let request = DeleteRequest::new("voice-to-delete");
        let body: Value =
            serde_json::to_value(EnrollmentRequest::delete(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "voice-enrollment",
                "input": {"action": "delete_voice", "voice_id": "voice-to-delete"}
            })
        );
    }

    #[test]
    fn test_body_action_matches_action_enum() {
        let creation = sample_creation();
        let query = StatusQuery::new("v");
        let list = ListQuery::default();
        let delete = DeleteRequest::new("v");

        for request in [
            EnrollmentRequest::create(&creation),
            EnrollmentRequest::query(&query),
            EnrollmentRequest::list(&list),
            EnrollmentRequest::delete(&delete),
        ] {
            let body: Value = serde_json::to_value(&request).unwrap();
            assert_eq!(body["model"], ENROLLMENT_MODEL);
            assert_eq!(body["input"]["action"], request.action().as_str());
        }
    }
}

// =============================================================================
// Status Classification Tests
// =============================================================================

mod classification_tests {
    use super::*;

    #[test]
    fn test_classify_ok() {
        assert_eq!(VoiceStatus::classify(Some("OK")), VoiceStatus::Usable);
    }

    #[test]
    fn test_classify_deploying() {
        assert_eq!(VoiceStatus::classify(Some("DEPLOYING")), VoiceStatus::Pending);
    }

    #[test]
    fn test_classify_absent() {
        assert_eq!(VoiceStatus::classify(None), VoiceStatus::Unknown(None));
    }

    #[test]
    fn test_classify_other_values_pass_through() {
        for raw in ["UNDEPLOYED", "ok", "Deploying", "", " OK", "FAILED"] {
            assert_eq!(
                VoiceStatus::classify(Some(raw)),
                VoiceStatus::Unknown(Some(raw.to_string())),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_classify_is_deterministic() {
        for raw in [Some("OK"), Some("DEPLOYING"), Some("NEW"), None] {
            assert_eq!(VoiceStatus::classify(raw), VoiceStatus::classify(raw));
        }
    }

    #[test]
    fn test_undeployed_stays_unknown() {
        let status = VoiceStatus::classify(Some("UNDEPLOYED"));
        assert!(status.is_undeployed());
        assert!(!status.is_usable());
        assert!(!status.is_pending());
        assert!(!VoiceStatus::Unknown(None).is_undeployed());
    }

    #[test]
    fn test_raw_round_trips_classification() {
        for raw in [Some("OK"), Some("DEPLOYING"), Some("UNDEPLOYED"), None] {
            assert_eq!(VoiceStatus::classify(raw).raw(), raw);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(VoiceStatus::Usable.to_string(), "OK - ready to use");
        assert_eq!(
            VoiceStatus::Pending.to_string(),
            "DEPLOYING - wait a few minutes and retry"
        );
        assert_eq!(
            VoiceStatus::Unknown(Some("UNDEPLOYED".into())).to_string(),
            "UNDEPLOYED"
        );
        assert_eq!(VoiceStatus::Unknown(None).to_string(), "absent");
    }

    #[test]
    fn test_from_response_non_string_status() {
        let response = TaskResponse::new(200, json!({"output": {"status": 3}}));
        assert_eq!(VoiceStatus::from_response(&response), VoiceStatus::Unknown(None));
    }
}

// =============================================================================
// Response Accessor Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(TaskResponse::new(200, json!({})).is_success());
        assert!(TaskResponse::new(204, json!({})).is_success());
        assert!(!TaskResponse::new(400, json!({})).is_success());
        assert!(!TaskResponse::new(500, json!({})).is_success());
    }

    #[test]
    fn test_creation_response_accessors() {
        let response = TaskResponse::new(
            200,
            json!({
                "output": {"voice_id": "cosyvoice-v3-plus-testvoice-1234"},
                "usage": {"count": 1},
                "request_id": "req-1"
            }),
        );

        assert_eq!(response.voice_id(), Some("cosyvoice-v3-plus-testvoice-1234"));
        assert_eq!(response.request_id(), Some("req-1"));
        assert_eq!(response.output_status(), None);
        assert_eq!(response.error_code(), None);
    }

    #[test]
    fn test_error_response_accessors() {
        let response = TaskResponse::new(
            400,
            json!({
                "request_id": "req-2",
                "code": "InvalidParameter",
                "message": "url is not accessible"
            }),
        );

        assert_eq!(response.error_code(), Some("InvalidParameter"));
        assert_eq!(response.error_message(), Some("url is not accessible"));
        assert_eq!(response.voice_id(), None);
    }

    #[test]
    fn test_success_code_is_not_an_error() {
        let response = TaskResponse::new(200, json!({"code": "Success", "message": "ok"}));
        assert_eq!(response.error_code(), None);
        assert_eq!(response.error_message(), None);

        let response = TaskResponse::new(200, json!({"code": ""}));
        assert_eq!(response.error_code(), None);
    }

    #[test]
    fn test_output_not_an_object() {
        let response = TaskResponse::new(200, json!({"output": "nope"}));
        assert_eq!(response.output_status(), None);
        assert_eq!(response.voice_id(), None);
        assert!(response.voices().is_empty());

        let response = TaskResponse::new(200, json!([1, 2, 3]));
        assert_eq!(response.output_status(), None);
    }

    #[test]
    fn test_voices() {
        let response = TaskResponse::new(
            200,
            json!({
                "output": {
                    "voices": [
                        {"voice_id": "v1", "status": "OK", "gmt_create": "2025-01-20 10:00:00"},
                        {"voice_id": "v2"},
                        {"status": "OK"}
                    ]
                }
            }),
        );

        let voices = response.voices();
        assert_eq!(voices.len(), 2);
        assert_eq!(
            voices[0],
            ClonedVoice {
                voice_id: "v1".to_string(),
                status: "OK".to_string(),
                created_at: "2025-01-20 10:00:00".to_string(),
            }
        );
        assert_eq!(voices[1].voice_id, "v2");
        assert!(voices[1].status.is_empty());
    }

    #[test]
    fn test_status_report_from_response() {
        let response = TaskResponse::new(200, json!({"output": {"status": "DEPLOYING"}}));
        let report = StatusReport::from(response.clone());
        assert_eq!(report.status, VoiceStatus::Pending);
        assert_eq!(report.response, response);
    }

    #[test]
    fn test_pretty_body() {
        let response = TaskResponse::new(200, json!({"output": {"status": "OK"}}));
        let pretty = response.pretty_body();
        assert!(pretty.contains('\n'));
        assert_eq!(serde_json::from_str::<Value>(&pretty).unwrap(), response.body);
    }
}
