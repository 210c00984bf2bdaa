use std::fmt::Debug;

use log::*;

use crate::{
    events::{EventProducers, TransferVerifiedEvent},
    verifier,
    BankDirectory,
    TransferEvent,
    VerificationConfig,
    VerificationResult,
};

/// `TransferFlowApi` is the single verification-and-dispatch entry point. The HTTP webhook
/// handler and the local simulation driver are both thin adapters over [`Self::process_transfer`].
///
/// The API owns the immutable configuration and bank directory, so a pipeline run depends on
/// nothing but its event. It is safe to share behind `web::Data`/`Arc` across any number of
/// concurrent runs.
pub struct TransferFlowApi {
    config: VerificationConfig,
    directory: BankDirectory,
    producers: EventProducers,
}

impl Debug for TransferFlowApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TransferFlowApi")
    }
}

impl TransferFlowApi {
    pub fn new(config: VerificationConfig, directory: BankDirectory, producers: EventProducers) -> Self {
        Self { config, directory, producers }
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// The pure decision call. No side effects; see [`verifier::verify`].
    pub fn verify(&self, event: &TransferEvent) -> VerificationResult {
        verifier::verify(event, &self.config, &self.directory)
    }

    /// Verify one inbound event, record the decision locally, and hand the outcome to the
    /// subscribed dispatchers.
    ///
    /// Publication is fire-and-forget: this call returns as soon as the decision is made and the
    /// event is queued, so a slow notification or ledger sink cannot delay the caller's
    /// acknowledgment. The returned result reflects the verification outcome only, never the
    /// fate of the sinks.
    pub async fn process_transfer(&self, event: TransferEvent) -> VerificationResult {
        let result = self.verify(&event);
        if result.approved {
            info!(
                "🔎️✅️ Approved: {event}. Profit share {} NT$, net {} NT$.",
                result.profit_share, result.net_amount
            );
        } else {
            info!("🔎️❌️ Rejected: {event}. The reported account does not match the configured one.");
        }
        self.publish_outcome(event, &result).await;
        result
    }

    async fn publish_outcome(&self, event: TransferEvent, result: &VerificationResult) {
        for producer in &self.producers.transfer_verified_producer {
            trace!("🔎️📬️ Publishing outcome to a transfer-verified subscriber");
            producer.publish_event(TransferVerifiedEvent::new(event.clone(), result.clone())).await;
        }
    }
}
