use crate::transcript::SpeechSegment;
use anyhow::Result;
use std::collections::VecDeque;
use tokio::sync::mpsc;

/// One event from a capture source's stream.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// A recognition hypothesis, final or interim
    Segment(SpeechSegment),

    /// The source stopped on its own (not in response to `stop()`)
    Ended,

    /// The source failed with a recognizer error code (e.g. "not-allowed")
    Error(String),
}

/// Speech capture backend trait.
///
/// Implementations wrap a concrete recognizer (browser speech API bridge,
/// OS dictation service, scripted test source). Contract:
/// - `start` begins a recognition session and returns the event stream
/// - `stop` must flush any pending final hypotheses and then close the
///   event stream (drop the sender) so consumers can drain and finish
/// - already-finalized text is never re-emitted after a restart
#[async_trait::async_trait]
pub trait CaptureSource: Send {
    /// Start capturing speech.
    ///
    /// Returns a channel receiver that will receive capture events.
    async fn start(&mut self) -> Result<mpsc::Receiver<CaptureEvent>>;

    /// Stop capturing speech.
    async fn stop(&mut self) -> Result<()>;

    /// Check if the source is currently capturing
    fn is_capturing(&self) -> bool;

    /// Get source name for logging
    fn name(&self) -> &str;
}

/// Deterministic capture source for tests and demos.
///
/// Each call to `start` delivers the next scripted batch of events up
/// front, then keeps the stream open until `stop` closes it. A batch
/// ending in [`CaptureEvent::Ended`] simulates a recognizer that went
/// silent mid-capture, which exercises the restart policy.
pub struct ScriptedCaptureSource {
    batches: VecDeque<Vec<CaptureEvent>>,
    live: Option<mpsc::Sender<CaptureEvent>>,
    starts: usize,
    fail_after: Option<usize>,
}

impl ScriptedCaptureSource {
    pub fn new(batches: Vec<Vec<CaptureEvent>>) -> Self {
        Self {
            batches: batches.into(),
            live: None,
            starts: 0,
            fail_after: None,
        }
    }

    /// Make every `start` call after the first `n` fail, to exercise
    /// restart-failure handling.
    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    /// Number of times `start` has been called.
    pub fn starts(&self) -> usize {
        self.starts
    }
}

#[async_trait::async_trait]
impl CaptureSource for ScriptedCaptureSource {
    async fn start(&mut self) -> Result<mpsc::Receiver<CaptureEvent>> {
        if let Some(n) = self.fail_after {
            if self.starts >= n {
                anyhow::bail!("scripted start failure");
            }
        }
        self.starts += 1;

        let batch = self.batches.pop_front().unwrap_or_default();
        let (tx, rx) = mpsc::channel(batch.len() + 1);
        for event in batch {
            // Capacity covers the whole batch, so this cannot fail
            let _ = tx.try_send(event);
        }
        self.live = Some(tx);
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        // Dropping the sender closes the stream
        self.live = None;
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.live.is_some()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
