use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::DetectionConfig;
use crate::models::DetectionEvent;

use super::traits::{ActionClassifier, PoseFeatureSource};
use super::worker::detection_loop;

/// Owns the detection loop task and its cancellation token.
pub struct DetectionController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl DetectionController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    /// Spawn the detection loop. Returns the event stream the session
    /// binding consumes.
    pub fn start(
        &mut self,
        source: Box<dyn PoseFeatureSource>,
        classifier: Arc<dyn ActionClassifier>,
        config: DetectionConfig,
    ) -> Result<mpsc::UnboundedReceiver<DetectionEvent>> {
        if self.handle.is_some() {
            bail!("detection already active");
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(detection_loop(
            source,
            classifier,
            config,
            events_tx,
            token_clone,
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(events_rx)
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("detection loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for DetectionController {
    fn default() -> Self {
        Self::new()
    }
}
