//! The single background fetch a dashboard page performs.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::FetchFailure;
use crate::model::ShipmentRecord;
use crate::source::ShipmentSource;

pub type FetchResult = Result<Vec<ShipmentRecord>, FetchFailure>;

/// A fetch running on a tokio runtime, polled from a synchronous UI loop.
///
/// Dropping the value abandons the result: the background task still runs to
/// completion and its send simply goes nowhere.
pub struct PendingFetch {
    receiver: oneshot::Receiver<FetchResult>,
    task: JoinHandle<()>,
}

impl PendingFetch {
    pub fn spawn(runtime: &Handle, source: Arc<dyn ShipmentSource>) -> Self {
        let (sender, receiver) = oneshot::channel();
        let task = runtime.spawn(async move {
            let origin = source.describe();
            info!(source = origin.as_str(), "fetching shipments");
            let result = source.fetch().await;
            match &result {
                Ok(records) => info!(
                    source = origin.as_str(),
                    count = records.len(),
                    "shipment fetch succeeded"
                ),
                Err(err) => warn!(source = origin.as_str(), error = %err, "shipment fetch failed"),
            }
            if sender.send(result).is_err() {
                debug!("shipment fetch resolved after its page was closed");
            }
        });
        Self { receiver, task }
    }

    /// Returns the outcome once the fetch has resolved, `None` while it is running.
    pub fn poll(&mut self) -> Option<FetchResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(FetchFailure::Abandoned)),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn wait(self) -> FetchResult {
        self.receiver
            .await
            .unwrap_or(Err(FetchFailure::Abandoned))
    }

    #[cfg(test)]
    fn abandon(self) -> JoinHandle<()> {
        drop(self.receiver);
        self.task
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    /// Source that holds its answer until the test opens the gate.
    pub(crate) struct GatedSource {
        pub(crate) gate: Arc<Notify>,
        pub(crate) records: Vec<ShipmentRecord>,
    }

    #[async_trait]
    impl ShipmentSource for GatedSource {
        fn describe(&self) -> String {
            "gated".into()
        }

        async fn fetch(&self) -> FetchResult {
            self.gate.notified().await;
            Ok(self.records.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ShipmentSource for FailingSource {
        fn describe(&self) -> String {
            "failing".into()
        }

        async fn fetch(&self) -> FetchResult {
            Err(FetchFailure::Status(503))
        }
    }

    pub(crate) fn shipment(id: &str, arrival: &str) -> ShipmentRecord {
        ShipmentRecord {
            id: id.into(),
            house_bill_number: format!("HB-{id}"),
            client: "Acme".into(),
            origin: "Shanghai".into(),
            destination: "Melbourne".into(),
            status: "Booked".into(),
            mode: "air".into(),
            estimated_arrival: arrival.into(),
            estimated_departure: String::new(),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn poll_reports_loading_until_resolved() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(GatedSource {
            gate: gate.clone(),
            records: vec![shipment("a", "2024-01-10")],
        });
        let mut pending = PendingFetch::spawn(&Handle::current(), source);
        assert!(pending.poll().is_none());

        gate.notify_one();
        while !pending.is_finished() {
            tokio::task::yield_now().await;
        }
        let records = pending.poll().expect("resolved").expect("records");
        assert_eq!(records.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failures_are_delivered() {
        let pending = PendingFetch::spawn(&Handle::current(), Arc::new(FailingSource));
        let err = pending.wait().await.unwrap_err();
        assert!(matches!(err, FetchFailure::Status(503)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn resolving_after_abandon_is_harmless() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(GatedSource {
            gate: gate.clone(),
            records: Vec::new(),
        });
        let task = PendingFetch::spawn(&Handle::current(), source).abandon();

        gate.notify_one();
        task.await.expect("fetch task finishes cleanly");
    }
}
