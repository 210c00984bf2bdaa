use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use dispatch_tools::{SheetsApi, TelegramApi};
use log::info;
use transfer_engine::{
    dispatch::{dispatch_hooks, DispatchApi},
    events::{EventHandlers, EventProducers},
    BankDirectory,
    TransferFlowApi,
};

use crate::{
    config::{ServerConfig, ServerOptions},
    data_objects::WEBHOOK_SECRET_HEADER,
    errors::ServerError,
    integrations::{SheetsLedger, TelegramNotifier},
    middleware::WebhookAuthMiddlewareFactory,
    routes::{bank_webhook, health},
};

/// Events queued for dispatch while the sinks are busy. Dispatch is fire-and-forget, so this
/// only bounds memory, not latency.
const EVENT_BUFFER_SIZE: usize = 100;

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let directory = BankDirectory::load_from_file(&config.bank_directory_path);
    let producers = start_dispatchers(&config)?;
    let srv = create_server_instance(config, directory, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Build the sink clients, wire them into the event bus, and spawn the handler loop. The
/// returned producers feed the [`TransferFlowApi`] instances created per worker.
pub fn start_dispatchers(config: &ServerConfig) -> Result<EventProducers, ServerError> {
    let telegram =
        TelegramApi::new(config.telegram.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let sheets = SheetsApi::new(config.sheets.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let dispatch = DispatchApi::new(TelegramNotifier::new(telegram), SheetsLedger::new(sheets))
        .with_sink_timeout(config.sink_timeout);
    let handlers = EventHandlers::new(EVENT_BUFFER_SIZE, dispatch_hooks(dispatch));
    let producers = handlers.producers();
    handlers.start_handlers();
    info!("📬️ Outcome dispatchers are running.");
    Ok(producers)
}

pub fn create_server_instance(
    config: ServerConfig,
    directory: BankDirectory,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let api = TransferFlowApi::new(config.verification.clone(), directory.clone(), producers.clone());
        let options = ServerOptions::from_config(&config);
        let webhook_auth = WebhookAuthMiddlewareFactory::new(
            WEBHOOK_SECRET_HEADER,
            config.verification.shared_secret.clone(),
            config.webhook_auth_checks,
        );
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("btm::access_log"))
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(options))
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into()),
            )
            .service(health)
            .service(web::scope("/webhook").wrap(webhook_auth).service(bank_webhook))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
