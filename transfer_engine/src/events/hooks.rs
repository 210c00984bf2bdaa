use std::{future::Future, pin::Pin, sync::Arc};

use tokio::task::JoinHandle;

use crate::events::{EventHandler, EventProducer, Handler, TransferVerifiedEvent};

/// The producer handles passed into [`crate::TransferFlowApi`]. Each verified transfer is
/// published to every producer in the set.
#[derive(Default, Clone)]
pub struct EventProducers {
    pub transfer_verified_producer: Vec<EventProducer<TransferVerifiedEvent>>,
}

pub struct EventHandlers {
    pub on_transfer_verified: Option<EventHandler<TransferVerifiedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_transfer_verified = hooks.on_transfer_verified.map(|f| EventHandler::new(buffer_size, f));
        Self { on_transfer_verified }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_transfer_verified {
            result.transfer_verified_producer.push(handler.subscribe());
        }
        result
    }

    /// Spawn the handler loops. The returned handles complete once every producer has been
    /// dropped and all in-flight jobs have drained, which lets short-lived drivers (the
    /// simulation CLI) wait for their sinks before exiting.
    pub fn start_handlers(self) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();
        if let Some(handler) = self.on_transfer_verified {
            handles.push(tokio::spawn(async move {
                handler.start_handler().await;
            }));
        }
        handles
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_transfer_verified: Option<Handler<TransferVerifiedEvent>>,
}

impl EventHooks {
    pub fn on_transfer_verified<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(TransferVerifiedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_transfer_verified = Some(Arc::new(f));
        self
    }
}
