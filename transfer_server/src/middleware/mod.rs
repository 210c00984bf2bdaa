mod secret;

pub use secret::WebhookAuthMiddlewareFactory;
