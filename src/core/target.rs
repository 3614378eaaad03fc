//! The output sink of the margin controller.

/// Anything whose top margin can be set in pixels.
///
/// The controller only ever writes through this trait; the lifecycle of the
/// underlying node belongs to whoever attached the controller.
pub trait StyleTarget {
    /// Set the top margin to `px` pixels (the `margin-top: <px>px` write).
    fn set_margin_top(&mut self, px: i32);
}

impl<T: StyleTarget + ?Sized> StyleTarget for &mut T {
    fn set_margin_top(&mut self, px: i32) {
        (**self).set_margin_top(px);
    }
}

impl<T: StyleTarget + ?Sized> StyleTarget for Box<T> {
    fn set_margin_top(&mut self, px: i32) {
        (**self).set_margin_top(px);
    }
}

/// Publishes every margin write into a `watch` channel so the renderer can
/// read the latest value without sharing the controller.
#[derive(Debug)]
pub struct WatchTarget {
    tx: tokio::sync::watch::Sender<Option<i32>>,
}

impl WatchTarget {
    /// Create a target plus the receiver the renderer reads from.
    /// The receiver holds `None` until the first write.
    pub fn channel() -> (Self, tokio::sync::watch::Receiver<Option<i32>>) {
        let (tx, rx) = tokio::sync::watch::channel(None);
        (Self { tx }, rx)
    }
}

impl StyleTarget for WatchTarget {
    fn set_margin_top(&mut self, px: i32) {
        // Unchanged values don't wake the renderer.
        self.tx.send_if_modified(|current| {
            if *current == Some(px) {
                false
            } else {
                *current = Some(px);
                true
            }
        });
    }
}
