//! Viewport size signal.
//!
//! The terminal size is broadcast over a watch channel. Components that care
//! about resizes hold a `ResizeListener`; dropping it unregisters them.

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u16,
    pub height: u16,
}

impl ViewportSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug)]
pub struct Viewport {
    size_tx: watch::Sender<ViewportSize>,
}

impl Viewport {
    pub fn new(size: ViewportSize) -> Self {
        let (size_tx, _) = watch::channel(size);
        Self { size_tx }
    }

    /// Publish a new size. Returns `false` if nothing changed.
    pub fn resize(&self, width: u16, height: u16) -> bool {
        let next = ViewportSize::new(width, height);
        self.size_tx.send_if_modified(|size| {
            if *size == next {
                return false;
            }
            *size = next;
            true
        })
    }

    pub fn size(&self) -> ViewportSize {
        *self.size_tx.borrow()
    }

    /// Register a resize listener.
    pub fn listen(&self) -> ResizeListener {
        ResizeListener {
            size_rx: self.size_tx.subscribe(),
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.size_tx.receiver_count()
    }
}

/// Registration on a `Viewport`, released on drop.
#[derive(Debug)]
pub struct ResizeListener {
    size_rx: watch::Receiver<ViewportSize>,
}

impl ResizeListener {
    /// Size the listener has seen last, marking it seen.
    pub fn current(&mut self) -> ViewportSize {
        *self.size_rx.borrow_and_update()
    }

    /// New size since the last call, if any.
    pub fn poll(&mut self) -> Option<ViewportSize> {
        match self.size_rx.has_changed() {
            Ok(true) => Some(*self.size_rx.borrow_and_update()),
            _ => None,
        }
    }
}
