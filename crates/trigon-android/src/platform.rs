use std::time::Duration;

use ndk::native_window::NativeWindow;
use raw_window_handle::{AndroidNdkWindowHandle, RawWindowHandle};
use trigon_engine::{Platform, PlatformEvent};
use winit::platform::android::activity::{AndroidApp, InputStatus, MainEvent, PollEvent};

use crate::input::DeferredInput;

/// `Platform` over the NativeActivity event queue.
///
/// Holds a reference on the current `ANativeWindow` from init-window until
/// the matching terminate-window has been dispatched, so the handle given to
/// the controller stays valid while its surface exists.
pub struct AndroidPlatform {
    app: AndroidApp,
    window: Option<NativeWindow>,
    input: DeferredInput,
    destroy_requested: bool,
}

impl AndroidPlatform {
    pub fn new(app: AndroidApp) -> Self {
        Self {
            app,
            window: None,
            input: DeferredInput::default(),
            destroy_requested: false,
        }
    }
}

fn window_handle(window: &NativeWindow) -> RawWindowHandle {
    RawWindowHandle::AndroidNdk(AndroidNdkWindowHandle::new(window.ptr().cast()))
}

impl Platform for AndroidPlatform {
    fn poll_events(&mut self, dispatch: &mut dyn FnMut(PlatformEvent)) -> usize {
        let mut dispatched = 0;

        self.app.poll_events(Some(Duration::ZERO), |event| {
            let PollEvent::Main(event) = event else {
                return;
            };
            dispatched += 1;

            match event {
                MainEvent::InitWindow { .. } => {
                    self.window = self.app.native_window();
                    dispatch(PlatformEvent::WindowAvailable(
                        self.window.as_ref().map(window_handle),
                    ));
                }
                MainEvent::TerminateWindow { .. } => {
                    dispatch(PlatformEvent::WindowLost);
                    self.window = None;
                }
                MainEvent::Destroy => {
                    self.destroy_requested = true;
                    dispatch(PlatformEvent::Other("Destroy"));
                }
                MainEvent::InputAvailable => {
                    self.input.mark();
                    dispatch(PlatformEvent::Other("InputAvailable"));
                }
                MainEvent::Start => dispatch(PlatformEvent::Other("Start")),
                MainEvent::Resume { .. } => dispatch(PlatformEvent::Other("Resume")),
                MainEvent::Pause => dispatch(PlatformEvent::Other("Pause")),
                MainEvent::Stop => dispatch(PlatformEvent::Other("Stop")),
                MainEvent::GainedFocus => dispatch(PlatformEvent::Other("GainedFocus")),
                MainEvent::LostFocus => dispatch(PlatformEvent::Other("LostFocus")),
                MainEvent::SaveState { .. } => dispatch(PlatformEvent::Other("SaveState")),
                MainEvent::ConfigChanged { .. } => dispatch(PlatformEvent::Other("ConfigChanged")),
                MainEvent::LowMemory => dispatch(PlatformEvent::Other("LowMemory")),
                _ => dispatch(PlatformEvent::Other("Other")),
            }
        });

        // Unconsumed input stalls the activity.
        let app = &self.app;
        self.input.flush(|| {
            if let Ok(mut iter) = app.input_events_iter() {
                while iter.next(|_| InputStatus::Unhandled) {}
            }
        });

        dispatched
    }

    fn destroy_requested(&self) -> bool {
        self.destroy_requested
    }
}
