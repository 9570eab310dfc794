use std::sync::Arc;

use log::{error, info, warn};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::config::DetectionConfig;
use crate::models::DetectionEvent;

use super::engine::DetectionEngine;
use super::traits::{ActionClassifier, PoseFeatureSource};

/// Frame-rate detection loop: poll the pose source, feed the engine, run
/// the classifier off the async thread, and emit events.
///
/// Classification is awaited inline, so verdicts are applied in the order
/// their windows completed. Shuts down when the token is cancelled or the
/// event receiver is dropped.
pub async fn detection_loop(
    mut source: Box<dyn PoseFeatureSource>,
    classifier: Arc<dyn ActionClassifier>,
    config: DetectionConfig,
    events: mpsc::UnboundedSender<DetectionEvent>,
    cancel_token: CancellationToken,
) {
    let mut engine = DetectionEngine::new(&config);
    let mut ticker = tokio::time::interval(config.frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let frame = match source.next_frame() {
                    Ok(frame) => frame,
                    Err(err) => {
                        warn!("pose extraction failed, dropping frame: {err:?}");
                        continue;
                    }
                };

                let outcome = engine.push_frame(frame.hands_present, frame.feature);
                for event in outcome.events {
                    if events.send(event).is_err() {
                        return;
                    }
                }

                let Some(window) = outcome.window else {
                    continue;
                };

                // Windows are only ever built at exactly the configured size
                debug_assert_eq!(window.len(), config.window_size);
                if window.len() != config.window_size {
                    warn!("not submitting malformed window of {} frames", window.len());
                    continue;
                }

                let classifier = Arc::clone(&classifier);
                let verdict = tokio::task::spawn_blocking(move || classifier.classify(&window)).await;
                match verdict {
                    Ok(Ok(result)) => {
                        if let Some(event) = engine.apply_classification(&result) {
                            info!(
                                "action detected: {} ({:.2})",
                                result.label.as_str(),
                                result.confidence()
                            );
                            if events.send(event).is_err() {
                                return;
                            }
                        }
                    }
                    // Fail-soft: the window's verdict is lost, frame
                    // processing continues
                    Ok(Err(err)) => warn!("classification failed, dropping window: {err:?}"),
                    Err(err) => error!("classifier worker join failed: {err}"),
                }
            }
            _ = cancel_token.cancelled() => {
                info!("detection loop shutting down");
                break;
            }
        }
    }
}
