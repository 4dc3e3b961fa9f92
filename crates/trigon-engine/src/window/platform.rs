use raw_window_handle::RawWindowHandle;

/// Platform lifecycle events the controller reacts to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PlatformEvent {
    /// A native window became available. `None` when the platform reported
    /// the event but had no window to hand out.
    WindowAvailable(Option<RawWindowHandle>),

    /// The native window is about to go away; GPU resources bound to it must
    /// be released before the handler returns.
    WindowLost,

    /// Anything else (focus, config change, input, ...). Ignored by the core.
    Other(&'static str),
}

/// Host application handle consumed by the frame loop.
///
/// Implementations own the OS event queue. The core never blocks on it.
pub trait Platform {
    /// Polls once with a zero timeout and passes whatever is pending to
    /// `dispatch`.
    ///
    /// Returns the number of events dispatched; `0` means the queue is drained.
    fn poll_events(&mut self, dispatch: &mut dyn FnMut(PlatformEvent)) -> usize;

    /// Becomes `true` once the OS asked the application to finish and stays so.
    fn destroy_requested(&self) -> bool;
}
