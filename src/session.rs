// session.rs — 一次“挂载”的全景查看会话
//
// Everything that belongs to one panorama lives here and dies with the
// session: view state, the in-flight load, the help overlay timers. The app
// routes input only to the current session, so dropping it is the teardown.

use crate::input::{InputTracker, ViewerInput};
use crate::loader::{spawn_load, ImageFetcher, LoadTask, LoadTracker, PanoramaImage};
use crate::overlay::HelpOverlay;
use crate::panorama::{Orientation, PanoramaViewer3D};
use std::sync::Arc;
use std::time::Instant;

pub struct ViewerSession {
    source: String,
    pub viewer: PanoramaViewer3D,
    pub load: LoadTracker,
    pub help: HelpOverlay,
    task: Option<LoadTask>,
}

impl ViewerSession {
    pub fn mount(
        source: impl Into<String>,
        fallback: impl Into<String>,
        fetcher: Arc<dyn ImageFetcher>,
        now: Instant,
    ) -> Self {
        let source = source.into();
        log::info!("mounting viewer for {}", source);
        let task = spawn_load(fetcher, source.clone(), fallback.into());
        Self {
            source,
            viewer: PanoramaViewer3D::new(),
            load: LoadTracker::new(),
            help: HelpOverlay::new(now),
            task: Some(task),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_showing(&self, source: &str) -> bool {
        self.source == source
    }

    pub fn handle_input(&mut self, input: ViewerInput) {
        match input {
            ViewerInput::PointerDown { x, y } => self.viewer.pointer_down(x, y),
            ViewerInput::PointerMove { x, y } => self.viewer.pointer_move(x, y),
            ViewerInput::PointerUp => self.viewer.pointer_up(),
            ViewerInput::Wheel { delta_y } => self.viewer.wheel(delta_y),
        }
    }

    /// Picks up a finished load. Returns the image the renderer should bind.
    pub fn poll_load(&mut self) -> Option<PanoramaImage> {
        let result = self.task.as_ref()?.try_take()?;
        self.task = None;
        match result {
            Ok(outcome) => self.load.resolve(outcome),
            Err(e) => {
                log::error!("panorama load for {} ended without a result: {}", self.source, e);
                self.load.fail();
                None
            }
        }
    }

    /// One render-loop step: timers, auto-rotation and latitude clamping.
    pub fn frame(&mut self, now: Instant) -> Orientation {
        self.help.tick(now);
        self.viewer.advance_frame()
    }

    pub fn show_error_banner(&self) -> bool {
        self.load.has_error() && !self.load.is_loading()
    }
}

/// Ends the current mount ahead of switching to `source`: the session is
/// dropped first, then `release_scene` runs, then the input tracker is cleared.
/// Returns false and leaves everything alone if `source` is already mounted.
pub fn end_for_remount(
    current: &mut Option<ViewerSession>,
    input: &mut InputTracker,
    source: &str,
    release_scene: impl FnOnce(),
) -> bool {
    if current.as_ref().is_some_and(|s| s.is_showing(source)) {
        log::debug!("{} is already mounted", source);
        return false;
    }
    current.take();
    release_scene();
    input.reset();
    true
}

impl Drop for ViewerSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            log::debug!("unmounting {} with its load still in flight", self.source);
            // 不等待后台线程：它发现接收端已关闭后会自行退出
            drop(task.abandon());
        } else {
            log::debug!("unmounting {}", self.source);
        }
    }
}
