//! Pure interaction state for the page's visual behaviors.
//!
//! Everything here is plain math and small state machines with no DOM
//! dependency, so the frontend wiring stays a thin layer of event glue and
//! the behaviors themselves are testable on the host.

pub const DOT_SMOOTHING: f64 = 0.5;
pub const RING_SMOOTHING: f64 = 0.15;

pub const MAGNETIC_PULL: f64 = 0.3;

pub const TILT_DIVISOR: f64 = 10.0;

pub const TYPE_DELAY_MS: u32 = 100;
pub const DELETE_DELAY_MS: u32 = 50;
pub const PHRASE_HOLD_MS: u32 = 2_000;
pub const PHRASE_GAP_MS: u32 = 500;
pub const TYPEWRITER_START_DELAY_MS: u32 = 1_000;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

pub const EGG_THRESHOLD: u32 = 5;
pub const CONFETTI_COUNT: usize = 100;
pub const CONFETTI_CLEANUP_MS: u32 = 4_000;
pub const CONFETTI_MIN_FALL_SECS: f64 = 2.0;
pub const CONFETTI_FALL_SPREAD_SECS: f64 = 2.0;
pub const CONFETTI_PALETTE: [&str; 5] =
    ["#c084fc", "#e879f9", "#f5f5f5", "#22c55e", "#3b82f6"];

pub const NAV_SCROLL_THRESHOLD: f64 = 100.0;
pub const NAV_BG_TOP: &str = "rgba(10, 10, 10, 0.8)";
pub const NAV_BG_SCROLLED: &str = "rgba(10, 10, 10, 0.95)";

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn toward(self, target: Point, factor: f64) -> Point {
        Point {
            x: self.x + (target.x - self.x) * factor,
            y: self.y + (target.y - self.y) * factor,
        }
    }
}

/// An element's bounding box in viewport coordinates.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Cursor follower state: a dot that tracks the pointer closely and a ring
/// that trails it.
///
/// Each animation frame moves both by a fixed fraction of the remaining
/// distance to the pointer, so both converge exponentially and never
/// overshoot.
#[derive(Clone, Copy, Debug, Default)]
pub struct Follower {
    dot: Point,
    ring: Point,
}

impl Follower {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame toward `target`.
    pub fn step(&mut self, target: Point) {
        self.dot = self.dot.toward(target, DOT_SMOOTHING);
        self.ring = self.ring.toward(target, RING_SMOOTHING);
    }

    pub fn dot(&self) -> Point {
        self.dot
    }

    pub fn ring(&self) -> Point {
        self.ring
    }
}

/// Displacement of a magnetic element toward the pointer: 30% of the
/// pointer's offset from the element center.
pub fn magnetic_offset(pointer: Point, bounds: Bounds) -> (f64, f64) {
    let dx = pointer.x - bounds.left - bounds.width / 2.0;
    let dy = pointer.y - bounds.top - bounds.height / 2.0;
    (dx * MAGNETIC_PULL, dy * MAGNETIC_PULL)
}

pub fn magnetic_transform(pointer: Point, bounds: Bounds) -> String {
    let (dx, dy) = magnetic_offset(pointer, bounds);
    format!("translate({dx:.2}px, {dy:.2}px)")
}

/// Tilt rotation angles in degrees for a pointer inside `bounds`:
/// rotateX from the vertical offset, rotateY from the inverted horizontal
/// offset.
pub fn tilt_angles(pointer: Point, bounds: Bounds) -> (f64, f64) {
    let x = pointer.x - bounds.left;
    let y = pointer.y - bounds.top;
    let center_x = bounds.width / 2.0;
    let center_y = bounds.height / 2.0;

    let rotate_x = (y - center_y) / TILT_DIVISOR;
    let rotate_y = (center_x - x) / TILT_DIVISOR;
    (rotate_x, rotate_y)
}

pub fn tilt_transform(pointer: Point, bounds: Bounds) -> String {
    let (rotate_x, rotate_y) = tilt_angles(pointer, bounds);
    format!("perspective(1000px) rotateX({rotate_x:.2}deg) rotateY({rotate_y:.2}deg) scale(1.05)")
}

/// One typewriter step: the text to display and the delay before the next
/// step.
#[derive(Clone, PartialEq, Debug)]
pub struct Tick {
    pub text: String,
    pub delay_ms: u32,
}

/// Cycles through a fixed phrase list forever: type a phrase character by
/// character, hold, delete it, pause, move on to the next (wrapping).
#[derive(Clone, Debug)]
pub struct Typewriter {
    phrases: &'static [&'static str],
    phrase: usize,
    chars: usize,
    deleting: bool,
}

impl Typewriter {
    /// `phrases` must be non-empty and each phrase non-empty.
    pub fn new(phrases: &'static [&'static str]) -> Self {
        debug_assert!(phrases.iter().all(|p| !p.is_empty()));
        Self {
            phrases,
            phrase: 0,
            chars: 0,
            deleting: false,
        }
    }

    /// Advance one step.
    pub fn tick(&mut self) -> Tick {
        let current = self.phrases[self.phrase];
        let len = current.chars().count();

        let mut delay_ms = if self.deleting {
            self.chars -= 1;
            DELETE_DELAY_MS
        } else {
            self.chars += 1;
            TYPE_DELAY_MS
        };
        let text: String = current.chars().take(self.chars).collect();

        if !self.deleting && self.chars == len {
            // Full phrase on screen: hold before deleting.
            self.deleting = true;
            delay_ms = PHRASE_HOLD_MS;
        } else if self.deleting && self.chars == 0 {
            // Empty again: pause, then start the next phrase.
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
            delay_ms = PHRASE_GAP_MS;
        }

        Tick { text, delay_ms }
    }
}

/// One-way latch for scroll reveal: flips on the first intersection and
/// never resets.
#[derive(Clone, Copy, Debug, Default)]
pub struct RevealLatch {
    revealed: bool,
}

impl RevealLatch {
    /// Returns true only on the transition into the revealed state.
    pub fn update(&mut self, intersecting: bool) -> bool {
        if intersecting && !self.revealed {
            self.revealed = true;
            return true;
        }
        false
    }
}

/// Easter-egg click counter. Fires once per threshold crossing and resets,
/// so repeated bursts need a full set of clicks each.
#[derive(Clone, Copy, Debug, Default)]
pub struct EggCounter {
    clicks: u32,
}

impl EggCounter {
    /// Register a click; returns true when this click triggers a burst.
    pub fn click(&mut self) -> bool {
        self.clicks += 1;
        if self.clicks == EGG_THRESHOLD {
            self.clicks = 0;
            return true;
        }
        false
    }
}

/// A single confetti particle's randomized styling.
///
/// The fall duration is drawn from [2 s, 4 s) but every particle is removed
/// by a fixed 4 s cleanup timer; the removal timer is intentionally decoupled
/// from the animation length.
#[derive(Clone, PartialEq, Debug)]
pub struct Particle {
    pub color: &'static str,
    pub left_vw: f64,
    pub round: bool,
    pub fall_secs: f64,
}

impl Particle {
    /// Draw a particle from a uniform [0, 1) random source.
    pub fn random(rng: &mut impl FnMut() -> f64) -> Self {
        let color_index =
            ((rng() * CONFETTI_PALETTE.len() as f64) as usize).min(CONFETTI_PALETTE.len() - 1);
        Self {
            color: CONFETTI_PALETTE[color_index],
            left_vw: rng() * 100.0,
            round: rng() > 0.5,
            fall_secs: CONFETTI_MIN_FALL_SECS + rng() * CONFETTI_FALL_SPREAD_SECS,
        }
    }

    /// Inline style for the spawned particle node.
    pub fn css_text(&self) -> String {
        let radius = if self.round { "50%" } else { "0" };
        format!(
            "position: fixed; width: 10px; height: 10px; background: {}; \
             left: {:.2}vw; top: -10px; border-radius: {}; pointer-events: none; \
             z-index: 9999; animation: confetti-fall {:.2}s linear forwards;",
            self.color, self.left_vw, radius, self.fall_secs
        )
    }
}

/// Nav background for a vertical scroll offset. Exactly 100 px is still the
/// top-of-page presentation.
pub fn nav_background(scroll_y: f64) -> &'static str {
    if scroll_y > NAV_SCROLL_THRESHOLD {
        NAV_BG_SCROLLED
    } else {
        NAV_BG_TOP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASES: &[&str] = &["ab", "xyz"];

    fn dist(a: Point, b: Point) -> f64 {
        ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
    }

    #[test]
    fn test_follower_converges_monotonically() {
        let target = Point::new(200.0, 120.0);
        let mut follower = Follower::new();

        let mut last_dot = dist(follower.dot(), target);
        let mut last_ring = dist(follower.ring(), target);
        for _ in 0..60 {
            follower.step(target);
            let dot = dist(follower.dot(), target);
            let ring = dist(follower.ring(), target);
            assert!(dot < last_dot, "dot distance grew: {dot} >= {last_dot}");
            assert!(ring < last_ring, "ring distance grew: {ring} >= {last_ring}");
            last_dot = dot;
            last_ring = ring;
        }

        // Both end up essentially on the pointer.
        assert!(last_dot < 1e-6);
        assert!(last_ring < 1.0);
    }

    #[test]
    fn test_dot_leads_ring() {
        let target = Point::new(100.0, 0.0);
        let mut follower = Follower::new();

        for _ in 0..10 {
            follower.step(target);
            assert!(
                dist(follower.dot(), target) < dist(follower.ring(), target),
                "dot should always be closer than the ring"
            );
        }
    }

    #[test]
    fn test_magnetic_offset_is_thirty_percent() {
        let bounds = Bounds {
            left: 100.0,
            top: 100.0,
            width: 80.0,
            height: 40.0,
        };
        // Pointer 20px right and 10px below center.
        let (dx, dy) = magnetic_offset(Point::new(160.0, 130.0), bounds);
        assert!((dx - 6.0).abs() < 1e-9);
        assert!((dy - 3.0).abs() < 1e-9);

        // Dead center means no displacement.
        let (dx, dy) = magnetic_offset(Point::new(140.0, 120.0), bounds);
        assert_eq!((dx, dy), (0.0, 0.0));
    }

    #[test]
    fn test_tilt_angles() {
        let bounds = Bounds {
            left: 0.0,
            top: 0.0,
            width: 200.0,
            height: 100.0,
        };
        // Center: identity rotation.
        assert_eq!(tilt_angles(Point::new(100.0, 50.0), bounds), (0.0, 0.0));

        // Bottom-right corner: tilts down and toward the pointer.
        let (rx, ry) = tilt_angles(Point::new(200.0, 100.0), bounds);
        assert!((rx - 5.0).abs() < 1e-9);
        assert!((ry + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_tilt_transform_string() {
        let bounds = Bounds {
            left: 0.0,
            top: 0.0,
            width: 200.0,
            height: 100.0,
        };
        let transform = tilt_transform(Point::new(200.0, 100.0), bounds);
        assert_eq!(
            transform,
            "perspective(1000px) rotateX(5.00deg) rotateY(-10.00deg) scale(1.05)"
        );
    }

    #[test]
    fn test_typewriter_delays() {
        let mut tw = Typewriter::new(PHRASES);

        // Typing "ab": one plain tick, then the hold with the full phrase.
        let tick = tw.tick();
        assert_eq!(tick.text, "a");
        assert_eq!(tick.delay_ms, TYPE_DELAY_MS);
        let tick = tw.tick();
        assert_eq!(tick.text, "ab");
        assert_eq!(tick.delay_ms, PHRASE_HOLD_MS);

        // Deleting: one plain tick, then the gap once the text is empty.
        let tick = tw.tick();
        assert_eq!(tick.text, "a");
        assert_eq!(tick.delay_ms, DELETE_DELAY_MS);
        let tick = tw.tick();
        assert_eq!(tick.text, "");
        assert_eq!(tick.delay_ms, PHRASE_GAP_MS);

        // The next phrase starts typing from its first character.
        let tick = tw.tick();
        assert_eq!(tick.text, "x");
        assert_eq!(tick.delay_ms, TYPE_DELAY_MS);
    }

    #[test]
    fn test_typewriter_full_cycle_is_periodic() {
        let mut tw = Typewriter::new(PHRASES);

        // Each phrase takes one tick per character to type and one to
        // delete.
        let cycle_len: usize = PHRASES.iter().map(|p| 2 * p.chars().count()).sum();

        let first: Vec<Tick> = (0..cycle_len).map(|_| tw.tick()).collect();
        assert_eq!(first.last().unwrap().text, "");

        // A second full cycle replays the first exactly.
        let second: Vec<Tick> = (0..cycle_len).map(|_| tw.tick()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reveal_latch_is_one_way() {
        let mut latch = RevealLatch::default();
        assert!(!latch.update(false));

        assert!(latch.update(true));

        // Scrolling back out never un-reveals, and re-entering does not fire
        // again.
        assert!(!latch.update(false));
        assert!(!latch.update(true));
    }

    #[test]
    fn test_egg_counter_bursts_every_fifth_click() {
        let mut egg = EggCounter::default();

        // Four clicks do nothing, the fifth bursts.
        assert!((0..4).all(|_| !egg.click()));
        assert!(egg.click());

        // The counter reset, so the pattern repeats.
        assert!((0..4).all(|_| !egg.click()));
        assert!(egg.click());

        // Ten clicks from fresh fire exactly two bursts.
        let mut egg = EggCounter::default();
        assert_eq!((0..10).filter(|_| egg.click()).count(), 2);
    }

    #[test]
    fn test_particle_fields_in_range() {
        // Deterministic low-discrepancy source.
        let mut seed = 0.0_f64;
        let mut rng = move || {
            seed = (seed + 0.618_033_988_749_895) % 1.0;
            seed
        };

        for _ in 0..CONFETTI_COUNT {
            let particle = Particle::random(&mut rng);
            assert!(CONFETTI_PALETTE.contains(&particle.color));
            assert!((0.0..100.0).contains(&particle.left_vw));
            assert!(
                particle.fall_secs >= CONFETTI_MIN_FALL_SECS
                    && particle.fall_secs < CONFETTI_MIN_FALL_SECS + CONFETTI_FALL_SPREAD_SECS
            );
        }
    }

    #[test]
    fn test_particle_css_text() {
        let particle = Particle {
            color: "#22c55e",
            left_vw: 33.333,
            round: true,
            fall_secs: 2.5,
        };
        let css = particle.css_text();
        assert!(css.contains("background: #22c55e;"));
        assert!(css.contains("left: 33.33vw;"));
        assert!(css.contains("border-radius: 50%;"));
        assert!(css.contains("animation: confetti-fall 2.50s linear forwards;"));

        let square = Particle {
            round: false,
            ..particle
        };
        assert!(square.css_text().contains("border-radius: 0;"));
    }

    #[test]
    fn test_nav_background_threshold() {
        assert_eq!(nav_background(0.0), NAV_BG_TOP);
        assert_eq!(nav_background(99.0), NAV_BG_TOP);
        // Boundary pins to the top-of-page side.
        assert_eq!(nav_background(100.0), NAV_BG_TOP);
        assert_eq!(nav_background(101.0), NAV_BG_SCROLLED);
    }
}
