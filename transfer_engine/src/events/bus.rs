//! Simple stateless pub-sub plumbing for pipeline events.
//!
//! Handlers receive nothing but the event itself and run on spawned tasks, so publishing never
//! blocks the request path on a slow subscriber. When the last producer is dropped the handler
//! drains any in-flight jobs and shuts down.
use std::{future::Future, pin::Pin, sync::Arc};

use futures_util::{stream::FuturesUnordered, StreamExt};
use log::*;
use tokio::sync::mpsc;

pub type Handler<E> = Arc<dyn Fn(E) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

pub struct EventHandler<E: Send + Sync + 'static> {
    listener: mpsc::Receiver<E>,
    sender: mpsc::Sender<E>,
    handler: Handler<E>,
}

impl<E: Send + Sync + 'static> EventHandler<E> {
    pub fn new(buffer_size: usize, handler: Handler<E>) -> Self {
        let (sender, listener) = mpsc::channel(buffer_size);
        Self { listener, sender, handler }
    }

    pub fn subscribe(&self) -> EventProducer<E> {
        EventProducer::new(self.sender.clone())
    }

    /// Run the handler loop until every producer has been dropped, then drain in-flight jobs.
    pub async fn start_handler(mut self) {
        debug!("📬️ Event handler started");
        // Drop the internal sender so the loop ends as soon as the last subscriber goes away.
        drop(self.sender);
        let mut jobs = FuturesUnordered::new();
        loop {
            tokio::select! {
                received = self.listener.recv() => match received {
                    Some(event) => {
                        trace!("📬️ Handling event");
                        let handler = Arc::clone(&self.handler);
                        jobs.push(tokio::spawn(async move { (handler)(event).await }));
                    },
                    None => break,
                },
                Some(finished) = jobs.next(), if !jobs.is_empty() => {
                    if let Err(e) = finished {
                        warn!("📬️ An event handler job panicked. {e}");
                    }
                },
            }
        }
        while let Some(finished) = jobs.next().await {
            if let Err(e) = finished {
                warn!("📬️ An event handler job panicked during shutdown. {e}");
            }
        }
        debug!("📬️ Event handler has shut down");
    }
}

#[derive(Clone)]
pub struct EventProducer<E: Send + Sync> {
    sender: mpsc::Sender<E>,
}

impl<E: Send + Sync> EventProducer<E> {
    pub fn new(sender: mpsc::Sender<E>) -> Self {
        Self { sender }
    }

    pub async fn publish_event(&self, event: E) {
        if let Err(e) = self.sender.send(event).await {
            error!("📬️ Failed to publish event: {e}");
        }
    }
}
