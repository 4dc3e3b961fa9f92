use std::rc::Rc;

use raw_window_handle::RawWindowHandle;

use crate::device::{DisplayApi, RenderContext, RendererConfig, SetupError};

use super::PlatformEvent;

/// Counters kept by the controller for diagnostics.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    /// Frames drawn and successfully presented.
    pub frames_presented: u64,
    /// Frames drawn whose present call failed.
    pub present_failures: u64,
    /// Render contexts brought up successfully.
    pub contexts_built: u64,
    /// Render context construction attempts that failed.
    pub setup_failures: u64,
}

/// Application state: the backend, its configuration, and the render context
/// while a window is available.
///
/// The render context is either fully built or absent; nothing else in the
/// crate can observe a partial one.
pub struct LifecycleController<D: DisplayApi> {
    api: Rc<D>,
    config: RendererConfig,
    render: Option<RenderContext<D>>,
    stats: FrameStats,
    last_setup_error: Option<SetupError>,
}

impl<D: DisplayApi> LifecycleController<D> {
    pub fn new(api: D, config: RendererConfig) -> Self {
        Self {
            api: Rc::new(api),
            config,
            render: None,
            stats: FrameStats::default(),
            last_setup_error: None,
        }
    }

    /// Reacts to one platform event. Never fails; problems are logged.
    pub fn handle_event(&mut self, event: PlatformEvent) {
        match event {
            PlatformEvent::WindowAvailable(Some(window)) => self.create_renderer(window),
            PlatformEvent::WindowAvailable(None) => {
                log::warn!("window-available event without a window; ignoring");
            }
            PlatformEvent::WindowLost => self.destroy_renderer(),
            PlatformEvent::Other(kind) => log::debug!("ignoring platform event: {kind}"),
        }
    }

    /// Draws one frame if a render context exists.
    ///
    /// Returns whether a draw was issued. A failed present is logged and
    /// counted; the context is kept.
    pub fn draw_frame(&mut self) -> bool {
        let Some(render) = &self.render else {
            return false;
        };

        match render.draw(self.config.clear_color) {
            Ok(()) => self.stats.frames_presented += 1,
            Err(e) => {
                self.stats.present_failures += 1;
                log::error!("present failed: {e}");
            }
        }
        true
    }

    /// Final teardown once the frame loop exits.
    pub fn shutdown(&mut self) {
        self.destroy_renderer();
        log::info!(
            "shutdown: {} frames presented, {} contexts built",
            self.stats.frames_presented,
            self.stats.contexts_built
        );
    }

    pub fn is_rendering(&self) -> bool {
        self.render.is_some()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Error from the most recent failed construction, cleared on success.
    pub fn last_setup_error(&self) -> Option<&SetupError> {
        self.last_setup_error.as_ref()
    }

    fn create_renderer(&mut self, window: RawWindowHandle) {
        // A second window-available without a loss in between replaces the
        // old context instead of leaking it.
        self.destroy_renderer();

        match RenderContext::new(&self.api, window, &self.config) {
            Ok(render) => {
                self.render = Some(render);
                self.last_setup_error = None;
                self.stats.contexts_built += 1;
            }
            Err(e) => {
                log::error!("renderer setup failed: {:#}", anyhow::Error::new(e.clone()));
                self.last_setup_error = Some(e);
                self.stats.setup_failures += 1;
            }
        }
    }

    fn destroy_renderer(&mut self) {
        // Dropping the context releases everything it holds.
        self.render = None;
    }
}
