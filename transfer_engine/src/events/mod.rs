mod bus;
mod event_types;
mod hooks;

pub use bus::{EventHandler, EventProducer, Handler};
pub use event_types::TransferVerifiedEvent;
pub use hooks::{EventHandlers, EventHooks, EventProducers};
