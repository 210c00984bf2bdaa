//! Fan-out of verification outcomes to the notification and ledger sinks.
//!
//! Dispatch runs after the verification decision is finalized. Each sink call is bounded by a
//! timeout and its failure is logged and swallowed: a dead chat sink does not stop the ledger
//! write, a missing ledger does not stop the notifications, and neither ever reaches the
//! webhook caller.
use std::{fmt::Debug, future::Future, pin::Pin, sync::Arc, time::Duration};

use log::*;
use tokio::time::timeout;

use crate::{
    events::{EventHooks, TransferVerifiedEvent},
    messages,
    traits::{NotificationSink, TransferLedger},
    LedgerEntry,
    TransferEvent,
    VerificationResult,
};

pub const DEFAULT_SINK_TIMEOUT: Duration = Duration::from_secs(10);

pub struct DispatchApi<N, L> {
    notifier: N,
    ledger: L,
    sink_timeout: Duration,
}

impl<N, L> Debug for DispatchApi<N, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DispatchApi")
    }
}

impl<N, L> DispatchApi<N, L>
where
    N: NotificationSink,
    L: TransferLedger,
{
    pub fn new(notifier: N, ledger: L) -> Self {
        Self { notifier, ledger, sink_timeout: DEFAULT_SINK_TIMEOUT }
    }

    pub fn with_sink_timeout(mut self, sink_timeout: Duration) -> Self {
        self.sink_timeout = sink_timeout;
        self
    }

    /// Dispatch one finalized outcome to the sinks.
    ///
    /// Approved transfers produce two notifications (funds received, profit share set aside) and
    /// one ledger row. Rejected transfers produce exactly one mismatch notification and never
    /// touch the ledger.
    pub async fn dispatch(&self, event: &TransferEvent, result: &VerificationResult) {
        if result.approved {
            self.send_notification(&messages::funds_received(event, result)).await;
            self.send_notification(&messages::profit_share_set_aside(result)).await;
            self.append_to_ledger(&LedgerEntry::new(event, result)).await;
        } else {
            self.send_notification(&messages::account_mismatch(event, result)).await;
        }
    }

    async fn send_notification(&self, text: &str) {
        match timeout(self.sink_timeout, self.notifier.notify(text)).await {
            Ok(Ok(())) => debug!("📣️ Notification delivered."),
            Ok(Err(e)) => warn!("📣️ Failed to deliver notification. {e}"),
            Err(_) => warn!("📣️ Notification was abandoned after {:?}.", self.sink_timeout),
        }
    }

    async fn append_to_ledger(&self, entry: &LedgerEntry) {
        match timeout(self.sink_timeout, self.ledger.append(entry)).await {
            Ok(Ok(())) => debug!("📒️ Transfer appended to the ledger."),
            Ok(Err(e)) => warn!("📒️ Could not append the transfer to the ledger. {e}"),
            Err(_) => warn!("📒️ Ledger append was abandoned after {:?}.", self.sink_timeout),
        }
    }
}

/// Wire a [`DispatchApi`] into the event bus, so that every published
/// [`TransferVerifiedEvent`] is dispatched off the request path.
pub fn dispatch_hooks<N, L>(api: DispatchApi<N, L>) -> EventHooks
where
    N: NotificationSink + Send + Sync + 'static,
    L: TransferLedger + Send + Sync + 'static,
{
    let api = Arc::new(api);
    let mut hooks = EventHooks::default();
    hooks.on_transfer_verified(move |ev: TransferVerifiedEvent| {
        let api = Arc::clone(&api);
        Box::pin(async move {
            api.dispatch(&ev.event, &ev.result).await;
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });
    hooks
}

#[cfg(test)]
mod test {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use btm_common::Money;
    use chrono::Local;

    use super::*;
    use crate::traits::SinkError;

    /// Records every message it is asked to deliver, optionally failing each call.
    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl NotificationSink for RecordingNotifier {
        async fn notify(&self, text: &str) -> Result<(), SinkError> {
            if self.fail {
                return Err(SinkError::Transport("connection refused".to_string()));
            }
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingLedger {
        rows: Arc<Mutex<Vec<LedgerEntry>>>,
        missing: bool,
    }

    impl TransferLedger for RecordingLedger {
        async fn append(&self, entry: &LedgerEntry) -> Result<(), SinkError> {
            if self.missing {
                return Err(SinkError::NotFound("no such sheet".to_string()));
            }
            self.rows.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    struct SleepyNotifier;

    impl NotificationSink for SleepyNotifier {
        async fn notify(&self, _text: &str) -> Result<(), SinkError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    fn approved_outcome() -> (TransferEvent, VerificationResult) {
        let event = TransferEvent::new("822", "111222333444", Money::from(50_000), Some("wire".to_string()));
        let result = VerificationResult {
            approved: true,
            bank_name: "CTBC Bank".to_string(),
            gross_amount: Money::from(50_000),
            profit_share: Money::from(5_000),
            net_amount: Money::from(45_000),
            profit_rate: 0.1,
            verified_at: Local::now(),
        };
        (event, result)
    }

    fn rejected_outcome() -> (TransferEvent, VerificationResult) {
        let event = TransferEvent::new("822", "000000000000", Money::from(100), None);
        let result = VerificationResult {
            approved: false,
            bank_name: "CTBC Bank".to_string(),
            gross_amount: Money::from(100),
            profit_share: Money::from(10),
            net_amount: Money::from(90),
            profit_rate: 0.1,
            verified_at: Local::now(),
        };
        (event, result)
    }

    #[tokio::test]
    async fn approved_transfer_notifies_twice_and_appends_once() {
        let _ = env_logger::try_init();
        let notifier = RecordingNotifier::default();
        let ledger = RecordingLedger::default();
        let (event, result) = approved_outcome();
        DispatchApi::new(notifier.clone(), ledger.clone()).dispatch(&event, &result).await;
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].contains("Inbound transfer confirmed"));
        assert!(sent[1].contains("set aside"));
        let rows = ledger.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].account, "111222333444");
        assert_eq!(rows[0].gross_amount, Money::from(50_000));
    }

    #[tokio::test]
    async fn rejected_transfer_notifies_once_and_never_touches_ledger() {
        let _ = env_logger::try_init();
        let notifier = RecordingNotifier::default();
        let ledger = RecordingLedger::default();
        let (event, result) = rejected_outcome();
        DispatchApi::new(notifier.clone(), ledger.clone()).dispatch(&event, &result).await;
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Account mismatch"));
        assert!(ledger.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn notification_failure_does_not_stop_the_ledger_write() {
        let _ = env_logger::try_init();
        let notifier = RecordingNotifier { fail: true, ..Default::default() };
        let ledger = RecordingLedger::default();
        let (event, result) = approved_outcome();
        DispatchApi::new(notifier, ledger.clone()).dispatch(&event, &result).await;
        assert_eq!(ledger.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_ledger_resource_is_swallowed() {
        let _ = env_logger::try_init();
        let notifier = RecordingNotifier::default();
        let ledger = RecordingLedger { missing: true, ..Default::default() };
        let (event, result) = approved_outcome();
        // must not panic or propagate
        DispatchApi::new(notifier.clone(), ledger).dispatch(&event, &result).await;
        assert_eq!(notifier.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn slow_sink_is_abandoned_after_the_timeout() {
        let _ = env_logger::try_init();
        let ledger = RecordingLedger::default();
        let api = DispatchApi::new(SleepyNotifier, ledger.clone()).with_sink_timeout(Duration::from_millis(20));
        let (event, result) = approved_outcome();
        let started = std::time::Instant::now();
        api.dispatch(&event, &result).await;
        assert!(started.elapsed() < Duration::from_secs(5), "dispatch did not respect the sink timeout");
        assert_eq!(ledger.rows.lock().unwrap().len(), 1, "the ledger write must still happen");
    }

    #[tokio::test]
    async fn hooks_dispatch_published_events() {
        let _ = env_logger::try_init();
        let notifier = RecordingNotifier::default();
        let ledger = RecordingLedger::default();
        let counted = Arc::new(AtomicUsize::new(0));

        let hooks = dispatch_hooks(DispatchApi::new(notifier.clone(), ledger.clone()));
        let handlers = crate::events::EventHandlers::new(10, hooks);
        let producers = handlers.producers();
        let handles = handlers.start_handlers();

        let (event, result) = approved_outcome();
        for producer in &producers.transfer_verified_producer {
            counted.fetch_add(1, Ordering::SeqCst);
            producer.publish_event(TransferVerifiedEvent::new(event.clone(), result.clone())).await;
        }
        drop(producers);
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(counted.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.sent.lock().unwrap().len(), 2);
        assert_eq!(ledger.rows.lock().unwrap().len(), 1);
    }
}
