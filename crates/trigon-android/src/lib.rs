//! NativeActivity entry point.
//!
//! Wires the Android event queue, EGL and GLES into the engine's frame loop.
//! Only `android_main` is exported; on other targets this crate is empty.

#[cfg(target_os = "android")]
mod egl;
#[cfg(target_os = "android")]
mod gl;
#[cfg(any(target_os = "android", test))]
mod input;
#[cfg(target_os = "android")]
mod platform;

#[cfg(target_os = "android")]
use winit::platform::android::activity::AndroidApp;

#[cfg(target_os = "android")]
#[unsafe(no_mangle)]
fn android_main(app: AndroidApp) {
    use trigon_engine::logging::{LoggingConfig, init_logging};

    init_logging(LoggingConfig::default());

    if let Err(e) = run(app) {
        log::error!("native app exited with error: {e:#}");
    }
}

#[cfg(target_os = "android")]
fn run(app: AndroidApp) -> anyhow::Result<()> {
    use anyhow::Context;
    use trigon_engine::{LifecycleController, RendererConfig, Runtime};

    let egl = egl::EglDisplayApi::load().context("failed to load libEGL")?;
    let mut controller = LifecycleController::new(egl, RendererConfig::default());
    let mut platform = platform::AndroidPlatform::new(app);

    Runtime::run(&mut platform, &mut controller);
    Ok(())
}
