use actix_web::http::StatusCode;

use super::helpers::{post_webhook, post_webhook_with, CTBC_ACCOUNT, POST_ACCOUNT, TEST_SECRET};

#[actix_web::test]
async fn approved_event_is_accepted() {
    let _ = env_logger::try_init();
    let body = format!(r#"{{"bank_code": "822", "account": "{CTBC_ACCOUNT}", "amount": 50000}}"#);
    let (status, body) = post_webhook(Some(TEST_SECRET), &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"success"}"#);
}

#[actix_web::test]
async fn rejected_event_is_still_accepted() {
    let _ = env_logger::try_init();
    // The HTTP response only acknowledges receipt; a mismatching account is not an HTTP error.
    let body = r#"{"bank_code": "822", "account": "000000000000", "amount": 100}"#;
    let (status, body) = post_webhook(Some(TEST_SECRET), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"success"}"#);
}

#[actix_web::test]
async fn post_bank_event_is_accepted() {
    let _ = env_logger::try_init();
    let body = format!(r#"{{"bank_code": "700", "account": "{POST_ACCOUNT}", "amount": 30000, "from_bank": "ATM"}}"#);
    let (status, body) = post_webhook(Some(TEST_SECRET), &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"success"}"#);
}

#[actix_web::test]
async fn missing_secret_is_forbidden() {
    let _ = env_logger::try_init();
    let body = format!(r#"{{"bank_code": "822", "account": "{CTBC_ACCOUNT}", "amount": 50000}}"#);
    let (status, body) = post_webhook(None, &body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains(r#""status":"error""#), "unexpected body: {body}");
}

#[actix_web::test]
async fn wrong_secret_is_forbidden() {
    let _ = env_logger::try_init();
    let body = format!(r#"{{"bank_code": "822", "account": "{CTBC_ACCOUNT}", "amount": 50000}}"#);
    let (status, _) = post_webhook(Some("not-the-secret"), &body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn auth_check_precedes_validation() {
    let _ = env_logger::try_init();
    // A bad secret together with a hopeless body must still yield 403, not 400.
    let (status, _) = post_webhook(Some("not-the-secret"), "this is not even json").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn missing_amount_is_a_validation_failure() {
    let _ = env_logger::try_init();
    let body = format!(r#"{{"bank_code": "822", "account": "{CTBC_ACCOUNT}"}}"#);
    let (status, body) = post_webhook(Some(TEST_SECRET), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("amount"), "unexpected body: {body}");
}

#[actix_web::test]
async fn missing_bank_code_is_a_validation_failure() {
    let _ = env_logger::try_init();
    let body = format!(r#"{{"account": "{CTBC_ACCOUNT}", "amount": 1000}}"#);
    let (status, body) = post_webhook(Some(TEST_SECRET), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("bank_code"), "unexpected body: {body}");
}

#[actix_web::test]
async fn non_numeric_amount_is_a_validation_failure() {
    let _ = env_logger::try_init();
    let body = format!(r#"{{"bank_code": "822", "account": "{CTBC_ACCOUNT}", "amount": "fifty grand"}}"#);
    let (status, _) = post_webhook(Some(TEST_SECRET), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn numeric_string_amount_is_accepted() {
    let _ = env_logger::try_init();
    let body = format!(r#"{{"bank_code": "822", "account": "{CTBC_ACCOUNT}", "amount": "50000"}}"#);
    let (status, body) = post_webhook(Some(TEST_SECRET), &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"success"}"#);
}

#[actix_web::test]
async fn malformed_json_is_a_validation_failure() {
    let _ = env_logger::try_init();
    let (status, body) = post_webhook(Some(TEST_SECRET), "{{{").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains(r#""status":"error""#), "unexpected body: {body}");
}

#[actix_web::test]
async fn unknown_bank_code_is_still_acknowledged() {
    let _ = env_logger::try_init();
    let body = r#"{"bank_code": "999", "account": "123", "amount": 10}"#;
    let (status, body) = post_webhook(Some(TEST_SECRET), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"success"}"#);
}

#[actix_web::test]
async fn auth_checks_can_be_disabled() {
    let _ = env_logger::try_init();
    let body = format!(r#"{{"bank_code": "822", "account": "{CTBC_ACCOUNT}", "amount": 50000}}"#);
    let (status, _) = post_webhook_with(false, None, &body).await;
    assert_eq!(status, StatusCode::OK);
}
