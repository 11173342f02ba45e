use std::cell::Cell;

/// Receiver of redraw-invalidation signals.
///
/// Fire-and-forget: the scene calls [`request_redraw`](Self::request_redraw)
/// after every state mutation and never waits for an acknowledgement. Multiple
/// requests before the next frame collapse into a single "needs redraw".
pub trait RedrawSink {
    fn request_redraw(&self);
}

/// Default redraw sink: a dirty flag plus a change counter.
///
/// The render scheduler polls [`take`](Self::take) once per frame. The
/// version keeps increasing across frames, so a consumer that caches by
/// version can also detect staleness without clearing the flag.
#[derive(Debug, Default)]
pub struct RedrawFlag {
    dirty: Cell<bool>,
    version: Cell<u64>,
}

impl RedrawFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a redraw has been requested since the last [`take`](Self::take).
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Consumes the pending request, returning whether there was one.
    pub fn take(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Total number of requests received over the flag's lifetime.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.get()
    }
}

impl RedrawSink for RedrawFlag {
    fn request_redraw(&self) {
        self.version.set(self.version.get().wrapping_add(1));
        self.dirty.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_collapse_until_taken() {
        let flag = RedrawFlag::new();
        assert!(!flag.is_dirty());

        flag.request_redraw();
        flag.request_redraw();
        flag.request_redraw();

        assert!(flag.is_dirty());
        assert_eq!(flag.version(), 3);

        assert!(flag.take());
        assert!(!flag.take());
        assert!(!flag.is_dirty());
        assert_eq!(flag.version(), 3);
    }
}
