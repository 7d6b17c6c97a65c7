//! Matrix rain animation plan
//!
//! Purely decorative. The `matrix` command builds a [`MatrixRain`] plan and
//! hands it to whatever [`AnimationSurface`] the host provides; nothing here
//! touches the log or the history.

use std::time::Duration;

use rand::Rng;

/// Number of glyphs per rain effect
pub const DROP_COUNT: usize = 50;

/// Delay between consecutive drops
pub const SPAWN_INTERVAL: Duration = Duration::from_millis(100);

/// How long each glyph stays on screen
pub const DROP_LIFETIME: Duration = Duration::from_millis(5000);

/// When the whole effect is torn down
pub const EFFECT_DURATION: Duration = Duration::from_millis(5000);

/// First code point of the katakana block used for glyphs
const GLYPH_BASE: u32 = 0x30A0;
const GLYPH_SPAN: u32 = 96;

/// One falling glyph
#[derive(Debug, Clone, PartialEq)]
pub struct RainDrop {
    pub glyph: char,
    /// Horizontal position in percent of the surface width, `[0, 100)`
    pub column: f32,
    /// Time the glyph takes to fall the full height
    pub fall: Duration,
    /// Offset from the start of the effect
    pub spawn_at: Duration,
    pub lifetime: Duration,
}

impl RainDrop {
    /// Whether the drop is on screen at `elapsed` into the effect
    pub fn is_visible(&self, elapsed: Duration, effect: Duration) -> bool {
        elapsed >= self.spawn_at && elapsed < self.spawn_at + self.lifetime && elapsed < effect
    }

    /// Fall progress in `[0, 1]` at `elapsed` into the effect
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let age = elapsed.saturating_sub(self.spawn_at).as_secs_f32();
        (age / self.fall.as_secs_f32().max(f32::EPSILON)).min(1.0)
    }
}

/// A full rain effect
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRain {
    pub drops: Vec<RainDrop>,
    /// Total lifetime of the effect
    pub duration: Duration,
}

impl MatrixRain {
    /// Build a randomized plan
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let drops = (0..DROP_COUNT)
            .map(|i| RainDrop {
                glyph: random_glyph(rng),
                column: rng.gen_range(0.0..100.0),
                fall: Duration::from_secs_f32(rng.gen_range(2.0..5.0)),
                spawn_at: SPAWN_INTERVAL * i as u32,
                lifetime: DROP_LIFETIME,
            })
            .collect();

        Self {
            drops,
            duration: EFFECT_DURATION,
        }
    }

    /// Drops on screen at `elapsed` into the effect
    pub fn visible_at(&self, elapsed: Duration) -> impl Iterator<Item = &RainDrop> {
        let duration = self.duration;
        self.drops
            .iter()
            .filter(move |drop| drop.is_visible(elapsed, duration))
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

fn random_glyph<R: Rng + ?Sized>(rng: &mut R) -> char {
    let offset = rng.gen_range(0..GLYPH_SPAN);
    char::from_u32(GLYPH_BASE + offset).unwrap_or('\u{30A2}')
}

/// Capability that plays an animation plan
pub trait AnimationSurface {
    fn play(&mut self, rain: MatrixRain);
}

/// Surface that discards animations
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnimation;

impl AnimationSurface for NoAnimation {
    fn play(&mut self, _rain: MatrixRain) {}
}
