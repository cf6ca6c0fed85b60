// fullscreen.rs — 全屏状态：以平台通知为准，而不是以自己的请求为准

/// Advisory fullscreen flag. Requests never change it directly; only
/// [`FullscreenState::sync`] with what the platform reports does.
#[derive(Debug, Default)]
pub struct FullscreenState {
    is_fullscreen: bool,
}

impl FullscreenState {
    pub fn new(is_fullscreen: bool) -> Self {
        Self { is_fullscreen }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// The state to ask the platform for when the user toggles.
    pub fn toggle_request(&self) -> bool {
        !self.is_fullscreen
    }

    /// Reconciles with the platform. Returns true if the flag changed.
    pub fn sync(&mut self, platform_fullscreen: bool) -> bool {
        let changed = self.is_fullscreen != platform_fullscreen;
        if changed {
            log::debug!("fullscreen is now {}", platform_fullscreen);
        }
        self.is_fullscreen = platform_fullscreen;
        changed
    }
}
