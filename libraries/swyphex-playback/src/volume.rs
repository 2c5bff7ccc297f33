//! Volume and mute intent
//!
//! Level is linear in `[0, 1]`, matching what media elements accept. Mute
//! preserves the level so unmuting restores it.

/// Volume intent
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume intent, clamping `level` into `[0, 1]`
    pub fn new(level: f32, muted: bool) -> Self {
        let level = clamp_level(level);
        Self {
            level,
            muted: muted || level == 0.0,
        }
    }

    /// Set volume level
    ///
    /// Dragging to zero mutes; any non-zero level clears mute.
    pub fn set_level(&mut self, level: f32) {
        self.level = clamp_level(level);
        self.muted = self.level == 0.0;
    }

    /// Current volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Toggle mute state, returning the new value
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level the adapter should play at: 0.0 when muted
    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0, false)
    }
}

fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
