///! Tests for the send path's input validation and the gateway's
///! fail-fast and error-envelope handling. No running server, database,
///! or network access is needed.
use serde_json::json;

use whatsapp_dashboard_backend::config::ProviderConfig;
use whatsapp_dashboard_backend::gateway::{
    SendError, WhatsAppClient, extract_message_id, provider_error_message,
};
use whatsapp_dashboard_backend::handlers::messages::{is_valid_phone_number, normalize_wa_id};

fn empty_config() -> ProviderConfig {
    ProviderConfig {
        api_key: String::new(),
        phone_number_id: String::new(),
        business_account_id: String::new(),
        access_token: String::new(),
    }
}

fn full_config() -> ProviderConfig {
    ProviderConfig {
        api_key: "key".to_string(),
        phone_number_id: "123456".to_string(),
        business_account_id: "789".to_string(),
        access_token: "token".to_string(),
    }
}

#[test]
fn test_valid_phone_numbers_pass() {
    assert!(is_valid_phone_number("+15551234567"));
    assert!(is_valid_phone_number("+1234567890")); // 10 digits, lower bound
    assert!(is_valid_phone_number("+123456789012345")); // 15 digits, upper bound
}

#[test]
fn test_invalid_phone_numbers_are_rejected() {
    // Missing the leading +.
    assert!(!is_valid_phone_number("15551234567"));
    // Too short / too long.
    assert!(!is_valid_phone_number("+123456789"));
    assert!(!is_valid_phone_number("+1234567890123456"));
    // Non-digit characters.
    assert!(!is_valid_phone_number("+1555123456a"));
    assert!(!is_valid_phone_number("+1 5551234567"));
    assert!(!is_valid_phone_number(""));
    assert!(!is_valid_phone_number("+"));
}

#[test]
fn test_normalization_strips_leading_plus() {
    assert_eq!(normalize_wa_id("+15551234567"), "15551234567");
    assert_eq!(normalize_wa_id("15551234567"), "15551234567");
}

#[test]
fn test_incomplete_config_is_detected() {
    assert!(!empty_config().is_complete());
    assert!(!empty_config().has_config());

    let mut partial = full_config();
    partial.access_token = String::new();
    assert!(!partial.is_complete());
    assert!(partial.has_config());

    assert!(full_config().is_complete());
}

#[tokio::test]
async fn test_send_fails_fast_without_config() {
    // Base URL pointing nowhere proves no network call is attempted.
    let client = WhatsAppClient::new(empty_config()).with_base_url("http://127.0.0.1:1");

    let result = client.send_text("15551234567", "hi").await;
    assert!(matches!(result, Err(SendError::MissingConfig)));
}

#[test]
fn test_provider_error_message_extraction() {
    let body = json!({
        "error": {
            "message": "Recipient phone number not in allowed list",
            "type": "OAuthException",
            "code": 131030,
        }
    });
    assert_eq!(
        provider_error_message(&body),
        "Recipient phone number not in allowed list"
    );

    // Envelope without the expected field falls back.
    assert_eq!(provider_error_message(&json!({})), "Unknown error");
}

#[test]
fn test_message_id_extraction() {
    let body = json!({
        "messaging_product": "whatsapp",
        "messages": [{ "id": "wamid.HBgLMTU1NTEyMzQ1NjcVAgARGBI5QTNDQTVCM0Q0Q0Q2RTY3RTcA" }],
    });
    assert_eq!(
        extract_message_id(&body),
        "wamid.HBgLMTU1NTEyMzQ1NjcVAgARGBI5QTNDQTVCM0Q0Q0Q2RTY3RTcA"
    );

    // Absent id synthesizes a msg_<millis> placeholder.
    let synthesized = extract_message_id(&json!({}));
    assert!(synthesized.starts_with("msg_"));
}
