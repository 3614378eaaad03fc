//! Scroll event source and scoped subscriptions.
//!
//! The host publishes absolute vertical scroll offsets into a broadcast
//! channel.  Attaching a margin controller spawns one listener task that
//! throttles the stream and feeds the controller in delivery order.  The
//! returned [`ScrollSubscription`] owns that task: dropping it stops the
//! listener, so no handler ever runs against a detached target.

use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::core::{
    margin::{MarginConfig, ScrollMarginController},
    target::StyleTarget,
    throttle::Throttle,
};

/// Buffered samples per subscriber before it starts lagging.
pub const DEFAULT_CAPACITY: usize = 256;

/// One scroll offset (pixels from the top), stamped when it was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSample {
    pub scroll_y: u32,
    pub at: Instant,
}

/// Stream of vertical scroll offsets.
#[derive(Debug, Clone)]
pub struct ScrollSource {
    tx: broadcast::Sender<ScrollSample>,
}

impl ScrollSource {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Deliver an offset to every live subscriber.  Without subscribers
    /// the sample is simply dropped.
    pub fn publish(&self, scroll_y: u32) {
        let _ = self.tx.send(ScrollSample {
            scroll_y,
            at: Instant::now(),
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<ScrollSample> {
        self.tx.subscribe()
    }
}

impl Default for ScrollSource {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Parameters for attaching a controller to a source.
#[derive(Debug, Clone, Copy)]
pub struct Attachment {
    pub config: MarginConfig,
    pub viewport_width: u32,
    pub min_viewport_width: u32,
    pub throttle_window: Duration,
}

/// Activate a margin controller on `target` and subscribe it to `source`.
///
/// The initial margin is applied before this returns.  Returns `None` when
/// the viewport is too narrow; in that case nothing subscribes and the
/// target is never written.  Must be called from within a tokio runtime.
pub fn attach<T>(source: &ScrollSource, target: T, attachment: Attachment) -> Option<ScrollSubscription>
where
    T: StyleTarget + Send + 'static,
{
    let controller = ScrollMarginController::activate(
        attachment.config,
        target,
        attachment.viewport_width,
        attachment.min_viewport_width,
    )?;

    // Subscribe before spawning so samples published right after `attach`
    // returns are not lost.
    let rx = source.subscribe();
    let throttle = Throttle::new(attachment.throttle_window);
    tracing::info!(
        viewport_width = attachment.viewport_width,
        init_margin = controller.config().init_margin_top(),
        throttle_ms = throttle.window().as_millis() as u64,
        "margin controller attached"
    );
    let task = tokio::spawn(listen(rx, controller, throttle));

    Some(ScrollSubscription { task: Some(task) })
}

async fn listen<T: StyleTarget>(
    mut rx: broadcast::Receiver<ScrollSample>,
    mut controller: ScrollMarginController<T>,
    mut throttle: Throttle,
) {
    loop {
        match rx.recv().await {
            Ok(ScrollSample { scroll_y, at }) => {
                // Judge spacing where the sample was produced; a listener
                // that wakes late must not merge samples that were far apart.
                if !throttle.admit(at) {
                    continue;
                }
                controller.on_scroll(scroll_y);
                tracing::trace!(scroll_y, margin = controller.margin(), "scroll sample applied");
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "scroll listener lagged; dropping stale samples");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Scoped handle for an attached controller.  Releasing it (explicitly or by
/// dropping) unsubscribes from the scroll source.
#[derive(Debug)]
#[must_use = "dropping the subscription detaches the controller immediately"]
pub struct ScrollSubscription {
    task: Option<JoinHandle<()>>,
}

impl ScrollSubscription {
    /// `true` while the listener is still running.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop listening.  Idempotent.
    pub fn release(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::info!("margin controller detached");
        }
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        self.release();
    }
}
