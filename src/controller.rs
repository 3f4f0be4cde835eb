// Effect parameter controller.
//
// Two scalar channels feed the noise pass: `direction` (left/right bias of
// the distortion) and `intensity` (how much of the effect is blended in).
// Event handlers only ever touch the targets; `tick` moves the current
// values once per frame.

use crate::constants::{INITIAL_INTENSITY, SCROLL_QUIET_SEC};
use crate::sections::SectionKind;

/// One smoothed scalar: `current += (target - current) * k` per step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Channel {
    pub current: f32,
    pub target: f32,
    k: f32,
}

impl Channel {
    pub fn new(current: f32, target: f32, k: f32) -> Self {
        Self {
            current,
            target,
            k: k.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn step(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.k;
        self.current
    }

    pub fn smoothing(&self) -> f32 {
        self.k
    }
}

/// Last-event-wins countdown used to end a scroll pulse.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollDebounce {
    remaining: Option<f32>,
    quiet_sec: f32,
}

impl ScrollDebounce {
    pub fn new(quiet_sec: f32) -> Self {
        Self {
            remaining: None,
            quiet_sec,
        }
    }

    /// Cancel any pending reset and start a fresh quiet period.
    pub fn arm(&mut self) {
        self.remaining = Some(self.quiet_sec);
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Returns true exactly once, on the step the quiet period runs out.
    pub fn advance(&mut self, dt_sec: f32) -> bool {
        match self.remaining {
            Some(left) => {
                let left = left - dt_sec.max(0.0);
                if left <= 0.0 {
                    self.remaining = None;
                    true
                } else {
                    self.remaining = Some(left);
                    false
                }
            }
            None => false,
        }
    }
}

/// Snapshot handed to the noise pass each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectParams {
    pub direction: f32,
    pub intensity: f32,
}

#[derive(Clone, Debug)]
pub struct EffectController {
    direction: Channel,
    intensity: Channel,
    scroll: ScrollDebounce,
}

impl EffectController {
    pub fn new(direction_k: f32, intensity_k: f32) -> Self {
        Self {
            direction: Channel::new(0.0, 0.0, direction_k),
            intensity: Channel::new(INITIAL_INTENSITY, 0.0, intensity_k),
            scroll: ScrollDebounce::new(SCROLL_QUIET_SEC),
        }
    }

    pub fn with_quiet_period(mut self, quiet_sec: f32) -> Self {
        self.scroll = ScrollDebounce::new(quiet_sec);
        self
    }

    /// Scroll activity: effect on now, off after the quiet period.
    pub fn set_scroll_active(&mut self) {
        self.intensity.target = 1.0;
        self.scroll.arm();
    }

    pub fn set_direction(&mut self, kind: SectionKind) {
        self.direction.target = kind.direction_target();
    }

    pub fn tick(&mut self, dt_sec: f32) -> EffectParams {
        if self.scroll.advance(dt_sec) {
            self.intensity.target = 0.0;
        }
        EffectParams {
            direction: self.direction.step(),
            intensity: self.intensity.step(),
        }
    }

    pub fn params(&self) -> EffectParams {
        EffectParams {
            direction: self.direction.current,
            intensity: self.intensity.current,
        }
    }

    pub fn direction(&self) -> &Channel {
        &self.direction
    }

    pub fn intensity(&self) -> &Channel {
        &self.intensity
    }

    pub fn scroll_pending(&self) -> bool {
        self.scroll.is_armed()
    }
}
