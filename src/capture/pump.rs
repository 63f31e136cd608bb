use super::source::{CaptureEvent, CaptureSource};
use crate::error::CaptureError;
use crate::transcript::TranscriptAccumulator;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tracing::{info, warn};

/// Consume a capture source's event stream for one capture session.
///
/// Owns the source for the duration of the session and returns it when
/// done, along with the fault that ended the session early (if any).
/// A source that ends on its own while the session is still active is
/// restarted, up to `max_restart_attempts` consecutive times; a segment
/// arriving resets the attempt count. Stopping is signalled through the
/// watch channel, after which pending final segments are drained.
pub async fn run_pump(
    mut source: Box<dyn CaptureSource>,
    mut rx: mpsc::Receiver<CaptureEvent>,
    accumulator: Arc<Mutex<TranscriptAccumulator>>,
    mut stop_rx: watch::Receiver<bool>,
    max_restart_attempts: u32,
) -> (Box<dyn CaptureSource>, Option<CaptureError>) {
    info!("capture pump started (source: {})", source.name());

    let mut consecutive_restarts: u32 = 0;
    let mut fault: Option<CaptureError> = None;

    loop {
        tokio::select! {
            _ = stop_rx.changed() => {
                if let Err(e) = source.stop().await {
                    warn!("capture source failed to stop: {}", e);
                    fault.get_or_insert(CaptureError::StopFailure(e.to_string()));
                }

                // The source flushes pending finals before closing the stream
                while let Some(event) = rx.recv().await {
                    match event {
                        CaptureEvent::Segment(segment) => {
                            accumulator.lock().await.push(&segment);
                        }
                        CaptureEvent::Ended => break,
                        CaptureEvent::Error(code) => {
                            warn!("capture source error while stopping: {}", code);
                        }
                    }
                }
                break;
            }

            event = rx.recv() => match event {
                Some(CaptureEvent::Segment(segment)) => {
                    accumulator.lock().await.push(&segment);
                    consecutive_restarts = 0;
                }
                Some(CaptureEvent::Error(code)) => {
                    warn!("capture source reported error: {}", code);
                    fault = Some(CaptureError::Recognizer(code));
                }
                Some(CaptureEvent::Ended) | None => {
                    // Source went silent while the session is still active
                    if *stop_rx.borrow() {
                        break;
                    }
                    if consecutive_restarts >= max_restart_attempts {
                        fault = Some(CaptureError::RestartExhausted {
                            attempts: consecutive_restarts,
                        });
                        break;
                    }
                    consecutive_restarts += 1;
                    match source.start().await {
                        Ok(new_rx) => {
                            info!(
                                "capture source restarted (attempt {}/{})",
                                consecutive_restarts, max_restart_attempts
                            );
                            rx = new_rx;
                        }
                        Err(e) => {
                            warn!("capture source restart failed: {}", e);
                            fault = Some(CaptureError::StartFailure(e.to_string()));
                            break;
                        }
                    }
                }
            }
        }
    }

    info!("capture pump stopped (source: {})", source.name());
    (source, fault)
}
