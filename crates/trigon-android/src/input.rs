/// Input drain deferred until the event poll has returned.
///
/// The input queue must not be read from inside the poll callback, so the
/// callback only marks that input arrived and the platform drains it once
/// the poll is done.
#[derive(Debug, Default)]
pub(crate) struct DeferredInput {
    pending: bool,
}

impl DeferredInput {
    pub(crate) fn mark(&mut self) {
        self.pending = true;
    }

    /// Runs `drain` once if input was marked since the last flush.
    pub(crate) fn flush(&mut self, drain: impl FnOnce()) -> bool {
        if std::mem::take(&mut self.pending) {
            drain();
            true
        } else {
            false
        }
    }
}
