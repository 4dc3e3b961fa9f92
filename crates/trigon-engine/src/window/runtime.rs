use crate::device::DisplayApi;

use super::{LifecycleController, Platform};

/// Entry point for the frame loop.
pub struct Runtime;

impl Runtime {
    /// Runs until the platform requests destruction, then tears down.
    ///
    /// Each iteration drains every pending platform event into `controller`
    /// before drawing at most one frame. Nothing here blocks.
    pub fn run<P, D>(platform: &mut P, controller: &mut LifecycleController<D>)
    where
        P: Platform + ?Sized,
        D: DisplayApi,
    {
        log::info!("frame loop started");

        while !platform.destroy_requested() {
            Self::pump_events(platform, controller);
            controller.draw_frame();
        }

        log::info!("destroy requested");
        controller.shutdown();
    }

    /// Polls until the platform reports an empty queue.
    ///
    /// Returns the number of events dispatched.
    pub fn pump_events<P, D>(platform: &mut P, controller: &mut LifecycleController<D>) -> usize
    where
        P: Platform + ?Sized,
        D: DisplayApi,
    {
        let mut total = 0;
        loop {
            let n = platform.poll_events(&mut |event| controller.handle_event(event));
            if n == 0 {
                return total;
            }
            total += n;
        }
    }
}
