use crate::orchestrator::Aggregator;
use events::{DashboardSignal, DashboardState};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// The single writer of the dashboard snapshot.
///
/// Readers either take the current snapshot or subscribe to a `watch` channel; in both cases
/// they only ever see whole, published states.
pub struct DashboardStore {
    aggregator: Aggregator,
    state_tx: watch::Sender<Arc<DashboardState>>,
}

impl DashboardStore {
    pub fn new(aggregator: Aggregator) -> Self {
        let (state_tx, _) = watch::channel(Arc::new(DashboardState::initial()));
        Self {
            aggregator,
            state_tx,
        }
    }

    pub fn snapshot(&self) -> Arc<DashboardState> {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardState>> {
        self.state_tx.subscribe()
    }

    /// Runs one refresh cycle and returns the snapshot it published.
    ///
    /// The previous data stays visible, flagged as loading, until the cycle completes.
    pub async fn refresh(&self) -> Arc<DashboardState> {
        let previous = self.snapshot();
        self.publish(previous.revalidating());

        let next = self.aggregator.refresh(&previous).await;
        self.publish(next)
    }

    /// Called when the upload workflow has replaced the active dataset.
    pub async fn notify_data_reconfigured(&self) -> Arc<DashboardState> {
        tracing::info!("Data source reconfigured; refreshing dashboard.");
        self.refresh().await
    }

    fn publish(&self, mut state: DashboardState) -> Arc<DashboardState> {
        self.state_tx.send_modify(|current| {
            state.version = current.version + 1;
            *current = Arc::new(state);
        });
        let published = self.snapshot();
        tracing::debug!(
            version = published.version,
            loading = published.loading,
            "Published dashboard state."
        );
        published
    }
}

/// A long-running task that applies dashboard signals one at a time until every sender is
/// dropped.
pub async fn run_signal_loop(
    store: Arc<DashboardStore>,
    mut signal_rx: mpsc::Receiver<DashboardSignal>,
) {
    tracing::info!("Dashboard signal loop started.");

    while let Some(signal) = signal_rx.recv().await {
        tracing::debug!(?signal, "Received dashboard signal.");
        let state = match signal {
            DashboardSignal::Refresh => store.refresh().await,
            DashboardSignal::DataReconfigured => store.notify_data_reconfigured().await,
        };
        if let Some(error) = &state.last_error {
            tracing::warn!(version = state.version, %error, "Dashboard refreshed with errors.");
        }
    }

    tracing::info!("Dashboard signal channel closed. Shutting down signal loop.");
}
