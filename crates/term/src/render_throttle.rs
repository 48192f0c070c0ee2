//! Redraw pacing for a mostly idle game screen.
//!
//! A 2048 frame only changes after input or when a milestone banner expires,
//! so the host loop asks the throttle before rendering: any change in the
//! frame fingerprint redraws at once, an unchanged frame is refreshed at most
//! once per `idle_interval_ms`.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    idle_interval_ms: u64,
    last_render_ms: Option<u64>,
    last_fingerprint: u64,
}

impl RenderThrottle {
    pub fn new(idle_interval_ms: u64) -> Self {
        Self {
            idle_interval_ms,
            last_render_ms: None,
            last_fingerprint: 0,
        }
    }

    /// Forget the last frame so the next call renders (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last_render_ms = None;
    }

    /// Decide whether to render a frame with `fingerprint` at `now_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        let due = match self.last_render_ms {
            None => true,
            Some(_) if fingerprint != self.last_fingerprint => true,
            Some(last) => now_ms.saturating_sub(last) >= self.idle_interval_ms,
        };

        if due {
            self.last_render_ms = Some(now_ms);
            self.last_fingerprint = fingerprint;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_forces_next_render() {
        let mut t = RenderThrottle::new(1000);
        assert!(t.should_render(0, 7));
        assert!(!t.should_render(5, 7));
        t.invalidate();
        assert!(t.should_render(6, 7));
    }
}
