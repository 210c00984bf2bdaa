//! Request handler definitions
//!
//! The webhook handler deliberately does very little: authenticate (middleware), validate,
//! build the event, hand it to the engine, acknowledge. The HTTP response only ever means
//! "event accepted for processing" — webhook callers never learn the verification outcome, let
//! alone the fate of the notification or ledger sinks.
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use log::*;
use transfer_engine::TransferFlowApi;

use crate::{
    config::ServerOptions,
    data_objects::{BankWebhookPayload, JsonResponse},
    errors::ServerError,
    helpers::get_remote_ip,
};

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Webhook  ----------------------------------------------------
/// `POST /webhook/bank` (the `/webhook` scope is wrapped by the shared-secret middleware).
#[post("/bank")]
pub async fn bank_webhook(
    req: HttpRequest,
    body: web::Json<BankWebhookPayload>,
    api: web::Data<TransferFlowApi>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    let remote = get_remote_ip(&req, options.use_x_forwarded_for, options.use_forwarded)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown peer".to_string());
    let event = body.into_inner().try_into_event().map_err(|e| {
        info!("🏧️ Rejecting malformed transfer notification from {remote}. {e}");
        e
    })?;
    debug!("🏧️ Transfer notification from {remote}: {event}");
    // The result is communicated through the sinks; the response is only an acknowledgment.
    let _ = api.process_transfer(event).await;
    Ok(HttpResponse::Ok().json(JsonResponse::success()))
}
