//! Shared-secret middleware for the webhook scope.
//!
//! The bank's notification service sends the shared secret verbatim in a request header. The
//! check runs before any body handling, so a request with a bad secret is turned away without
//! the payload ever being parsed: authorization strictly precedes validation.
use std::future::{ready, Ready};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use btm_common::Secret;
use futures::future::LocalBoxFuture;
use log::{trace, warn};

use crate::errors::ServerError;

pub struct WebhookAuthMiddlewareFactory {
    header_name: String,
    secret: Secret<String>,
    // If false, the middleware will not check the secret and always allow the call
    enabled: bool,
}

impl WebhookAuthMiddlewareFactory {
    pub fn new(header_name: &str, secret: Secret<String>, enabled: bool) -> Self {
        WebhookAuthMiddlewareFactory { header_name: header_name.into(), secret, enabled }
    }
}

impl<S, B> Transform<S, ServiceRequest> for WebhookAuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<EitherBody<B>>;
    type Transform = WebhookAuthMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(WebhookAuthMiddlewareService {
            header_name: self.header_name.clone(),
            secret: self.secret.clone(),
            enabled: self.enabled,
            service,
        }))
    }
}

pub struct WebhookAuthMiddlewareService<S> {
    header_name: String,
    secret: Secret<String>,
    enabled: bool,
    service: S,
}

impl<S, B> Service<ServiceRequest> for WebhookAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<EitherBody<B>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        trace!("🔐️ Checking webhook secret for request");
        if !self.enabled {
            trace!("🔐️ Webhook secret checks are disabled. Allowing request.");
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }
        let provided = req.headers().get(&self.header_name).and_then(|v| v.to_str().ok());
        let authorized = provided == Some(self.secret.reveal().as_str());
        if authorized {
            trace!("🔐️ Webhook secret check for request ✅️");
            let fut = self.service.call(req);
            Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
        } else {
            if provided.is_none() {
                warn!("🔐️ No webhook secret found in request. Denying access.");
            } else {
                warn!("🔐️ Invalid webhook secret found in request. Denying access.");
            }
            let response = req.error_response(ServerError::InvalidSignature).map_into_right_body();
            Box::pin(async move { Ok(response) })
        }
    }
}
