// overlay.rs — 操作提示浮层：挂载后 1 秒自动显示一次，5 秒后自动隐藏

use std::time::{Duration, Instant};

pub const HELP_SHOW_DELAY: Duration = Duration::from_secs(1);
pub const HELP_VISIBLE_FOR: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Scheduled { show_at: Instant },
    AutoShown { hide_at: Instant },
    Settled,
}

/// The auto timers fire exactly once per mount regardless of manual toggles.
#[derive(Debug)]
pub struct HelpOverlay {
    phase: Phase,
    visible: bool,
}

impl HelpOverlay {
    pub fn new(mounted_at: Instant) -> Self {
        Self {
            phase: Phase::Scheduled {
                show_at: mounted_at + HELP_SHOW_DELAY,
            },
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn tick(&mut self, now: Instant) {
        if let Phase::Scheduled { show_at } = self.phase {
            if now < show_at {
                return;
            }
            self.visible = true;
            self.phase = Phase::AutoShown {
                hide_at: show_at + HELP_VISIBLE_FOR,
            };
        }
        if let Phase::AutoShown { hide_at } = self.phase {
            if now >= hide_at {
                self.visible = false;
                self.phase = Phase::Settled;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_show_then_hide() {
        let t0 = Instant::now();
        let mut help = HelpOverlay::new(t0);

        help.tick(t0 + Duration::from_millis(999));
        assert!(!help.is_visible());

        help.tick(t0 + Duration::from_secs(1));
        assert!(help.is_visible());

        help.tick(t0 + Duration::from_millis(5999));
        assert!(help.is_visible());

        help.tick(t0 + Duration::from_secs(6));
        assert!(!help.is_visible());
        assert_eq!(help.phase, Phase::Settled);
    }

    #[test]
    fn test_never_auto_shows_twice() {
        let t0 = Instant::now();
        let mut help = HelpOverlay::new(t0);
        help.tick(t0 + Duration::from_secs(2));
        help.tick(t0 + Duration::from_secs(7));
        for s in 8..60 {
            help.tick(t0 + Duration::from_secs(s));
            assert!(!help.is_visible());
        }
    }

    #[test]
    fn test_late_tick_runs_both_timers() {
        let t0 = Instant::now();
        let mut help = HelpOverlay::new(t0);
        help.tick(t0 + Duration::from_secs(30));
        assert!(!help.is_visible());
        assert_eq!(help.phase, Phase::Settled);
    }

    #[test]
    fn test_manual_toggle() {
        let t0 = Instant::now();
        let mut help = HelpOverlay::new(t0);

        help.toggle();
        assert!(help.is_visible());
        help.toggle();
        assert!(!help.is_visible());

        // After the auto cycle the user can still open it, and it stays open.
        help.tick(t0 + Duration::from_secs(10));
        help.toggle();
        help.tick(t0 + Duration::from_secs(100));
        assert!(help.is_visible());
    }

    #[test]
    fn test_auto_hide_applies_after_manual_toggle() {
        let t0 = Instant::now();
        let mut help = HelpOverlay::new(t0);
        help.tick(t0 + Duration::from_secs(1));
        help.toggle();
        help.toggle();
        assert!(help.is_visible());
        help.tick(t0 + Duration::from_secs(6));
        assert!(!help.is_visible());
    }
}
