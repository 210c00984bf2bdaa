use actix_web::{http::StatusCode, test, test::TestRequest, web, App};
use btm_common::Secret;
use transfer_engine::{events::EventProducers, BankDirectory, TransferFlowApi, VerificationConfig};

use crate::{
    config::ServerOptions,
    data_objects::WEBHOOK_SECRET_HEADER,
    errors::ServerError,
    middleware::WebhookAuthMiddlewareFactory,
    routes::bank_webhook,
};

pub const TEST_SECRET: &str = "super-secret";
pub const CTBC_ACCOUNT: &str = "111222333444";
pub const POST_ACCOUNT: &str = "0001234567890";

// A flow API with no subscribed producers: endpoint tests exercise the HTTP contract only, and
// the sinks are provably never touched.
fn test_api() -> TransferFlowApi {
    let config = VerificationConfig::new(Secret::new(TEST_SECRET.to_string()))
        .with_expected_account("822", CTBC_ACCOUNT)
        .with_expected_account("700", POST_ACCOUNT);
    TransferFlowApi::new(config, BankDirectory::empty(), EventProducers::default())
}

pub async fn post_webhook(secret: Option<&str>, body: &str) -> (StatusCode, String) {
    post_webhook_with(true, secret, body).await
}

pub async fn post_webhook_with(auth_enabled: bool, secret: Option<&str>, body: &str) -> (StatusCode, String) {
    let mut req = TestRequest::post()
        .uri("/webhook/bank")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string());
    if let Some(secret) = secret {
        req = req.insert_header((WEBHOOK_SECRET_HEADER, secret));
    }
    let auth =
        WebhookAuthMiddlewareFactory::new(WEBHOOK_SECRET_HEADER, Secret::new(TEST_SECRET.to_string()), auth_enabled);
    let app = App::new()
        .app_data(web::Data::new(test_api()))
        .app_data(web::Data::new(ServerOptions { use_x_forwarded_for: false, use_forwarded: false }))
        .app_data(
            web::JsonConfig::default()
                .error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into()),
        )
        .service(web::scope("/webhook").wrap(auth).service(bank_webhook));
    let service = test::init_service(app).await;
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    (status, body)
}
