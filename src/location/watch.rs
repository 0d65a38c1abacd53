// Continuous location watch as an owned resource.
//
// The map acquires the watch when it mounts and drops it when it
// unmounts; the polling task dies with the watch. No global subscription
// state.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

/// A device coordinate fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Source of location fixes — the platform layer implements this.
#[async_trait]
pub trait LocationProvider: Send + Sync + 'static {
    async fn current(&self) -> Result<GeoPoint>;
}

/// A running location subscription. Polls the provider on an interval and
/// publishes fixes through a watch channel; readers see the latest fix.
pub struct LocationWatch {
    receiver: watch::Receiver<Option<GeoPoint>>,
    task: JoinHandle<()>,
}

impl LocationWatch {
    /// Start polling `provider` every `interval`. Failed fixes are logged
    /// and skipped — the previous fix stays current.
    pub fn start<P: LocationProvider>(provider: P, interval: Duration) -> Self {
        let (tx, receiver) = watch::channel(None);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match provider.current().await {
                    Ok(point) => {
                        if tx.send(Some(point)).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!(error = %e, "Location fix failed"),
                }
            }
        });

        Self { receiver, task }
    }

    /// A receiver for awaiting fix changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<GeoPoint>> {
        self.receiver.clone()
    }

    /// The most recent fix, if any has arrived yet.
    pub fn latest(&self) -> Option<GeoPoint> {
        *self.receiver.borrow()
    }

    /// Stop polling. Dropping the watch does the same.
    pub fn stop(self) {}
}

impl Drop for LocationWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}
