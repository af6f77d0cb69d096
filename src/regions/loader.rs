//! Background region loading scoped to its owner
//!
//! The fetch runs as a tokio task owned by a [`RegionLoader`]. Dropping the
//! loader, or calling [`RegionLoader::cancel`], aborts the task so a
//! response can never arrive after its consumer is gone.

use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::FiscaResult;
use crate::models::Region;

use super::client::RegionClient;

pub struct RegionLoader {
    handle: Option<JoinHandle<FiscaResult<Vec<Region>>>>,
}

impl RegionLoader {
    /// Start fetching on the current tokio runtime
    pub fn spawn(client: RegionClient) -> Self {
        let handle = tokio::spawn(async move { client.fetch().await });
        Self {
            handle: Some(handle),
        }
    }

    /// Abort the fetch; later calls to [`regions`](Self::regions) yield nothing
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Wait for the region list
    ///
    /// Any failure (network, status, decoding, cancellation) is logged and
    /// yields an empty list.
    pub async fn regions(mut self) -> Vec<Region> {
        let Some(handle) = self.handle.as_mut() else {
            return Vec::new();
        };

        match handle.await {
            Ok(Ok(regions)) => regions,
            Ok(Err(e)) => {
                warn!(error = %e, "region list unavailable");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "region fetch did not complete");
                Vec::new()
            }
        }
    }
}

impl Drop for RegionLoader {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
