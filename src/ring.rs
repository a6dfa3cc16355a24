//! The circular progress ring: configuration and state.
//!
//! A [`Ring`] holds every user-visible property of the widget (current
//! angle, start angle, direction, thickness ratios, glow, coloring) and
//! keeps them clamped or normalized at the setter boundary. Rendering is in
//! [`crate::render`], the animation state machine in [`crate::animation`].
//!
//! # Basic Usage
//!
//! ```rust
//! use circular_progress::ring::{new, with_start_angle, with_progress_thickness};
//! use kurbo::Size;
//!
//! // Create a ring with default settings
//! let ring = new(&[]);
//!
//! // Create a ring with custom settings using the option pattern
//! let mut ring = new(&[
//!     with_start_angle(-90.0),
//!     with_progress_thickness(0.6),
//! ]);
//! ring.set_bounds(Size::new(300.0, 300.0));
//! ring.set_progress(0.75);
//! assert!((ring.progress() - 0.75).abs() < 1e-9);
//! ```
//!
//! # Angle and progress
//!
//! `angle` (degrees) and `progress` (fraction) are two views of one value:
//! `progress == normalize(angle) / 360`, and setting progress clamps to
//! `[0, 1]` and writes `angle = p * 360`. The one tie-break: a positive
//! angle that is an exact multiple of 360 reads back as progress 1.0 and
//! draws a full circle, rather than wrapping to an empty one.

use crate::angle;
use crate::animation::AnimationRuntime;
use crate::render::RenderState;
use kurbo::Size;
use peniko::Color;

/// Fraction of the half-width used as the ring radius. The remaining 20%
/// is padding that stops glows from being clipped at the widget edge.
const RADIUS_PADDING: f64 = 0.8;

/// Pixel-per-degree-per-width glow scale shared by all glow modes.
const SIZE_TO_GLOW_RATIO: f64 = 0.000_15;

/// Default progress palette: white fading into cyan.
pub const DEFAULT_COLORS: [Color; 2] = [
    Color::new([1.0, 1.0, 1.0, 1.0]),
    Color::new([0.0, 1.0, 1.0, 1.0]),
];

const TRANSPARENT: Color = Color::new([0.0, 0.0, 0.0, 0.0]);
const BLACK: Color = Color::new([0.0, 0.0, 0.0, 1.0]);

/// How the glow blur radius relates to the traveled angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlowMode {
    /// Glow grows with the traveled angle.
    #[default]
    Forward,
    /// Glow shrinks as the traveled angle grows.
    Reverse,
    /// Glow is independent of the angle.
    Constant,
    /// No glow at all.
    NoGlow,
}

impl GlowMode {
    /// Shadow blur radius in pixels for a canonical sweep `angle` (0–360),
    /// a widget `width` and a clamped glow `amount`.
    pub fn blur_radius(self, angle: f64, width: f64, amount: f64) -> f64 {
        match self {
            GlowMode::Forward => angle * width * SIZE_TO_GLOW_RATIO * amount,
            GlowMode::Reverse => (360.0 - angle) * width * SIZE_TO_GLOW_RATIO * amount,
            GlowMode::Constant => 360.0 * width * SIZE_TO_GLOW_RATIO * amount,
            GlowMode::NoGlow => 0.0,
        }
    }
}

/// Configuration options for customizing ring appearance and behavior.
///
/// Options are applied in order by [`new`], so later options win where they
/// overlap. Every option has a matching `with_*` constructor function.
///
/// # Examples
///
/// ```rust
/// use circular_progress::ring::{new, with_colors, with_lerp_color_mode, GlowMode, with_glow};
/// use circular_progress::color::from_luma;
///
/// let ring = new(&[
///     with_colors(vec![from_luma(1.0, 1.0), from_luma(0.0, 1.0)]),
///     with_lerp_color_mode(),
///     with_glow(0.9, GlowMode::Constant),
/// ]);
/// ```
pub enum RingOption {
    /// Sets the widget bounds (and from them the ring radius).
    WithSize(Size),
    /// Replaces the ordered progress color sequence.
    WithColors(Vec<Color>),
    /// Sets the track ring color.
    WithTrackColor(Color),
    /// Sets the fill color of the circle interior (default transparent).
    WithInsideFill(Color),
    /// Sets the angle the arc sweeps from, in degrees (normalized to
    /// `[0, 360)`).
    WithStartAngle(f64),
    /// Sweeps the arc counterclockwise instead of clockwise.
    Counterclockwise,
    /// Uses butt end caps on the arc instead of rounded ones.
    WithoutRoundedCorners,
    /// Fills the arc with a single progress-interpolated color instead of
    /// a spatial gradient.
    WithLerpColorMode,
    /// Sets glow strength (clamped to `[0, 1]`) and mode.
    WithGlow(f64, GlowMode),
    /// Rotates the gradient by this factor of the current angle.
    WithGradientRotateSpeed(f64),
    /// Sets the progress arc thickness as a fraction of the radius,
    /// clamped to `[0, 1]`.
    WithProgressThickness(f64),
    /// Sets the track ring thickness as a fraction of the radius, clamped
    /// to `[0, 1]`.
    WithTrackThickness(f64),
}

impl RingOption {
    fn apply(&self, ring: &mut Ring) {
        match self {
            RingOption::WithSize(size) => ring.set_bounds(*size),
            RingOption::WithColors(colors) => ring.set_colors(colors.clone()),
            RingOption::WithTrackColor(color) => ring.set_track_color(*color),
            RingOption::WithInsideFill(color) => ring.set_inside_fill(*color),
            RingOption::WithStartAngle(degrees) => ring.set_start_angle(*degrees),
            RingOption::Counterclockwise => ring.set_clockwise(false),
            RingOption::WithoutRoundedCorners => ring.set_rounded_corners(false),
            RingOption::WithLerpColorMode => ring.set_lerp_color_mode(true),
            RingOption::WithGlow(amount, mode) => {
                ring.set_glow_amount(*amount);
                ring.set_glow_mode(*mode);
            }
            RingOption::WithGradientRotateSpeed(speed) => {
                ring.set_gradient_rotate_speed(*speed)
            }
            RingOption::WithProgressThickness(ratio) => ring.set_progress_thickness(*ratio),
            RingOption::WithTrackThickness(ratio) => ring.set_track_thickness(*ratio),
        }
    }
}

/// Sets the widget bounds at construction time.
pub fn with_size(size: Size) -> RingOption {
    RingOption::WithSize(size)
}

/// Replaces the ordered progress color sequence.
///
/// Zero colors fall back to a white fill, one color fills flat, two or more
/// build a gradient (or a lerp blend, see [`with_lerp_color_mode`]).
pub fn with_colors(colors: Vec<Color>) -> RingOption {
    RingOption::WithColors(colors)
}

/// Sets the track ring color.
pub fn with_track_color(color: Color) -> RingOption {
    RingOption::WithTrackColor(color)
}

/// Fills the circle interior with a color (default is transparent).
pub fn with_inside_fill(color: Color) -> RingOption {
    RingOption::WithInsideFill(color)
}

/// Sets the angle the arc sweeps from, in degrees.
pub fn with_start_angle(degrees: f64) -> RingOption {
    RingOption::WithStartAngle(degrees)
}

/// Sweeps the arc counterclockwise instead of clockwise.
pub fn counterclockwise() -> RingOption {
    RingOption::Counterclockwise
}

/// Uses butt end caps on the arc instead of rounded ones.
pub fn without_rounded_corners() -> RingOption {
    RingOption::WithoutRoundedCorners
}

/// Fills the arc with one progress-interpolated color per frame instead of
/// a spatial gradient across the arc.
pub fn with_lerp_color_mode() -> RingOption {
    RingOption::WithLerpColorMode
}

/// Sets glow strength (clamped to `[0, 1]`) and glow mode.
pub fn with_glow(amount: f64, mode: GlowMode) -> RingOption {
    RingOption::WithGlow(amount, mode)
}

/// Rotates the gradient by `speed * angle` degrees as progress advances.
pub fn with_gradient_rotate_speed(speed: f64) -> RingOption {
    RingOption::WithGradientRotateSpeed(speed)
}

/// Sets the progress arc thickness as a fraction of the radius.
pub fn with_progress_thickness(ratio: f64) -> RingOption {
    RingOption::WithProgressThickness(ratio)
}

/// Sets the track ring thickness as a fraction of the radius.
pub fn with_track_thickness(ratio: f64) -> RingOption {
    RingOption::WithTrackThickness(ratio)
}

/// The circular progress ring widget model.
///
/// Holds all clamped/normalized state, forwards it to the renderer on
/// [`Ring::draw`], and runs the animation state machine against an
/// injected [`AnimationEngine`](crate::animation::AnimationEngine).
///
/// All mutation and drawing is single-threaded (the UI thread); the widget
/// never blocks or suspends by itself.
///
/// # Examples
///
/// ```rust
/// use circular_progress::prelude::*;
/// use kurbo::Size;
///
/// let mut ring = ring_new(&[]);
/// ring.set_bounds(Size::new(300.0, 300.0));
///
/// // `angle` and `progress` are two views of the same value.
/// ring.set_angle(90.0);
/// assert!((ring.progress() - 0.25).abs() < 1e-9);
///
/// // Out-of-range input is clamped at the setter, never signaled.
/// ring.set_glow_amount(-0.2);
/// assert_eq!(ring.glow_amount(), 0.0);
/// ```
pub struct Ring {
    pub(crate) size: Size,
    pub(crate) radius: f64,
    pub(crate) angle: f64,
    pub(crate) start_angle: f64,
    pub(crate) clockwise: bool,
    pub(crate) rounded_corners: bool,
    pub(crate) lerp_color_mode: bool,
    pub(crate) gradient_rotate_speed: f64,
    pub(crate) glow_amount: f64,
    pub(crate) glow_mode: GlowMode,
    /// Half of the public thickness ratio; radius-offset math uses halves.
    pub(crate) progress_thickness: f64,
    /// Half of the public thickness ratio.
    pub(crate) track_thickness: f64,
    pub(crate) track_color: Color,
    pub(crate) inside_fill: Color,
    pub(crate) colors: Vec<Color>,
    /// Bumped whenever the color sequence changes; part of the gradient
    /// cache key.
    pub(crate) palette_rev: u64,
    pub(crate) animation: AnimationRuntime,
    pub(crate) renderer: RenderState,
}

impl std::fmt::Debug for Ring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ring")
            .field("size", &self.size)
            .field("radius", &self.radius)
            .field("angle", &self.angle)
            .field("start_angle", &self.start_angle)
            .field("clockwise", &self.clockwise)
            .field("rounded_corners", &self.rounded_corners)
            .field("lerp_color_mode", &self.lerp_color_mode)
            .field("gradient_rotate_speed", &self.gradient_rotate_speed)
            .field("glow_amount", &self.glow_amount)
            .field("glow_mode", &self.glow_mode)
            .field("colors", &self.colors)
            .field("animating", &self.is_animating())
            .finish()
    }
}

/// Creates a new ring with the specified configuration options.
///
/// # Default Configuration
///
/// - **Angle / start angle**: 0°, sweeping clockwise
/// - **Thickness**: progress 0.4, track 0.5 (fractions of the radius)
/// - **Corners**: rounded
/// - **Glow**: amount 1.0, [`GlowMode::Forward`]
/// - **Colors**: [`DEFAULT_COLORS`] (white to cyan), track black, interior
///   transparent
/// - **Bounds**: zero; call [`Ring::set_bounds`] from the host's layout
///   pass before drawing
/// - **Animation engine**: [`ClockEngine`](crate::animation::ClockEngine)
///
/// # Examples
///
/// ```rust
/// use circular_progress::ring::{new, counterclockwise, with_track_thickness};
///
/// let ring = new(&[counterclockwise(), with_track_thickness(0.7)]);
/// assert!(!ring.clockwise());
/// assert!((ring.track_thickness() - 0.7).abs() < 1e-9);
/// ```
pub fn new(opts: &[RingOption]) -> Ring {
    let mut ring = Ring {
        size: Size::ZERO,
        radius: 0.0,
        angle: 0.0,
        start_angle: 0.0,
        clockwise: true,
        rounded_corners: true,
        lerp_color_mode: false,
        gradient_rotate_speed: 0.0,
        glow_amount: 1.0,
        glow_mode: GlowMode::Forward,
        progress_thickness: 0.4 / 2.0,
        track_thickness: 0.5 / 2.0,
        track_color: BLACK,
        inside_fill: TRANSPARENT,
        colors: DEFAULT_COLORS.to_vec(),
        palette_rev: 0,
        animation: AnimationRuntime::default(),
        renderer: RenderState::default(),
    };

    for opt in opts {
        opt.apply(&mut ring);
    }

    ring
}

impl Ring {
    /// The current model angle in degrees. Logically unbounded; normalized
    /// on read by [`Ring::progress`] and by the renderer.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Sets the model angle in degrees.
    ///
    /// If an animation is in flight it is paused first (capturing the live
    /// interpolated value, reporting `finished = false`), so a structural
    /// angle write never races a running animation.
    pub fn set_angle(&mut self, degrees: f64) {
        self.pause_if_animating();
        self.angle = degrees;
    }

    /// Fractional completion: `normalize(angle) / 360`, except that a
    /// positive full turn reads as 1.0 rather than wrapping to 0.
    pub fn progress(&self) -> f64 {
        angle::sweep(self.angle) / 360.0
    }

    /// Sets progress as a fraction, clamped to `[0, 1]`, by writing
    /// `angle = p * 360`.
    pub fn set_progress(&mut self, p: f64) {
        self.set_angle(p.clamp(0.0, 1.0) * 360.0);
    }

    /// The angle the arc sweeps from, in `[0, 360)` degrees.
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Sets the start angle; any input is normalized to `[0, 360)`.
    pub fn set_start_angle(&mut self, degrees: f64) {
        self.start_angle = angle::normalize(degrees);
    }

    /// Whether the arc sweeps clockwise.
    pub fn clockwise(&self) -> bool {
        self.clockwise
    }

    /// Sets the sweep direction. Flipping it re-derives the gradient on the
    /// next draw.
    pub fn set_clockwise(&mut self, clockwise: bool) {
        self.clockwise = clockwise;
    }

    /// Whether the arc ends are drawn with rounded caps.
    pub fn rounded_corners(&self) -> bool {
        self.rounded_corners
    }

    /// Chooses rounded or butt end caps for the arc.
    pub fn set_rounded_corners(&mut self, rounded: bool) {
        self.rounded_corners = rounded;
    }

    /// Whether lerp-color mode is active.
    pub fn lerp_color_mode(&self) -> bool {
        self.lerp_color_mode
    }

    /// Switches between spatial-gradient coloring and one flat
    /// progress-interpolated color per frame.
    pub fn set_lerp_color_mode(&mut self, lerp: bool) {
        self.lerp_color_mode = lerp;
    }

    /// Gradient rotation factor per degree of progress.
    pub fn gradient_rotate_speed(&self) -> f64 {
        self.gradient_rotate_speed
    }

    /// Sets the gradient rotation factor.
    pub fn set_gradient_rotate_speed(&mut self, speed: f64) {
        self.gradient_rotate_speed = speed;
    }

    /// Glow strength in `[0, 1]`.
    pub fn glow_amount(&self) -> f64 {
        self.glow_amount
    }

    /// Sets glow strength, clamped to `[0, 1]`.
    pub fn set_glow_amount(&mut self, amount: f64) {
        self.glow_amount = amount.clamp(0.0, 1.0);
    }

    /// Current glow mode.
    pub fn glow_mode(&self) -> GlowMode {
        self.glow_mode
    }

    /// Sets the glow mode.
    pub fn set_glow_mode(&mut self, mode: GlowMode) {
        self.glow_mode = mode;
    }

    /// Progress arc thickness as the public fraction of the radius.
    pub fn progress_thickness(&self) -> f64 {
        self.progress_thickness * 2.0
    }

    /// Sets the progress arc thickness; the ratio is clamped to `[0, 1]`
    /// before being halved for internal radius-offset math.
    pub fn set_progress_thickness(&mut self, ratio: f64) {
        self.progress_thickness = ratio.clamp(0.0, 1.0) / 2.0;
    }

    /// Track ring thickness as the public fraction of the radius.
    pub fn track_thickness(&self) -> f64 {
        self.track_thickness * 2.0
    }

    /// Sets the track ring thickness; the ratio is clamped to `[0, 1]`
    /// before being halved for internal radius-offset math.
    pub fn set_track_thickness(&mut self, ratio: f64) {
        self.track_thickness = ratio.clamp(0.0, 1.0) / 2.0;
    }

    /// Track ring color.
    pub fn track_color(&self) -> Color {
        self.track_color
    }

    /// Sets the track ring color. Does not touch the gradient cache.
    pub fn set_track_color(&mut self, color: Color) {
        self.track_color = color;
    }

    /// Fill color of the circle interior.
    pub fn inside_fill(&self) -> Color {
        self.inside_fill
    }

    /// Sets the interior fill color.
    pub fn set_inside_fill(&mut self, color: Color) {
        self.inside_fill = color;
    }

    /// The ordered progress color sequence.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Replaces the progress color sequence, invalidating the gradient
    /// cache for the next draw.
    pub fn set_colors(&mut self, colors: Vec<Color>) {
        self.colors = colors;
        self.palette_rev += 1;
    }

    /// Current widget bounds.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The radius at which the strokes are centered before thickness
    /// offsets, derived from the bounds by [`Ring::set_bounds`].
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Consumes a layout pass: records the bounds and re-derives the ring
    /// radius as 80% of the half-width (the 20% padding keeps glows from
    /// being clipped).
    pub fn set_bounds(&mut self, size: Size) {
        self.size = size;
        self.radius = size.width / 2.0 * RADIUS_PADDING;
    }

    /// Notifies the ring it is about to leave the rendering hierarchy.
    /// Pauses a running animation so no dangling animation target remains.
    pub fn will_detach(&mut self) {
        self.pause_if_animating();
    }
}

impl Default for Ring {
    fn default() -> Self {
        new(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_no_options() {
        let ring = new(&[]);

        assert_eq!(ring.angle(), 0.0);
        assert_eq!(ring.start_angle(), 0.0);
        assert!(ring.clockwise());
        assert!(ring.rounded_corners());
        assert!(!ring.lerp_color_mode());
        assert_eq!(ring.glow_amount(), 1.0);
        assert_eq!(ring.glow_mode(), GlowMode::Forward);
        assert!((ring.progress_thickness() - 0.4).abs() < 1e-9);
        assert!((ring.track_thickness() - 0.5).abs() < 1e-9);
        assert_eq!(ring.colors().len(), 2);
        assert_eq!(ring.colors()[0].components, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_new_with_multiple_options() {
        let ring = new(&[
            counterclockwise(),
            without_rounded_corners(),
            with_lerp_color_mode(),
            with_start_angle(-90.0),
            with_glow(0.5, GlowMode::Constant),
        ]);

        assert!(!ring.clockwise());
        assert!(!ring.rounded_corners());
        assert!(ring.lerp_color_mode());
        assert!((ring.start_angle() - 270.0).abs() < 1e-9);
        assert_eq!(ring.glow_amount(), 0.5);
        assert_eq!(ring.glow_mode(), GlowMode::Constant);
    }

    #[test]
    fn test_progress_round_trips_through_angle() {
        let mut ring = new(&[]);
        for p in [0.0, 0.1, 0.25, 0.5, 0.75, 0.999, 1.0] {
            ring.set_progress(p);
            assert!((ring.progress() - p).abs() < 1e-9, "p = {p}");
            assert!((ring.angle() - p * 360.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_set_progress_clamps() {
        let mut ring = new(&[]);
        ring.set_progress(1.5);
        assert_eq!(ring.angle(), 360.0);
        assert_eq!(ring.progress(), 1.0);

        ring.set_progress(-0.5);
        assert_eq!(ring.angle(), 0.0);
        assert_eq!(ring.progress(), 0.0);
    }

    #[test]
    fn test_angle_beyond_one_turn_normalizes_on_read() {
        let mut ring = new(&[]);
        ring.set_angle(450.0);
        assert!((ring.progress() - 0.25).abs() < 1e-9);

        ring.set_angle(-90.0);
        assert!((ring.progress() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_thickness_clamped_then_halved() {
        let mut ring = new(&[]);
        ring.set_progress_thickness(1.5);
        assert_eq!(ring.progress_thickness, 0.5); // internal half ratio
        assert_eq!(ring.progress_thickness(), 1.0);

        ring.set_track_thickness(-0.3);
        assert_eq!(ring.track_thickness, 0.0);
    }

    #[test]
    fn test_glow_amount_clamped() {
        let mut ring = new(&[]);
        ring.set_glow_amount(-0.2);
        assert_eq!(ring.glow_amount(), 0.0);
        ring.set_glow_amount(7.0);
        assert_eq!(ring.glow_amount(), 1.0);
    }

    #[test]
    fn test_start_angle_normalized_in_setter() {
        let mut ring = new(&[]);
        ring.set_start_angle(400.0);
        assert!((ring.start_angle() - 40.0).abs() < 1e-9);
        ring.set_start_angle(360.0);
        assert_eq!(ring.start_angle(), 0.0);
    }

    #[test]
    fn test_set_bounds_derives_radius_with_padding() {
        let mut ring = new(&[]);
        ring.set_bounds(Size::new(300.0, 300.0));
        assert!((ring.radius() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_glow_formula_forward() {
        // 90° at width 300 and full amount: 90 * 300 * 0.00015 * 1 = 4.05
        let blur = GlowMode::Forward.blur_radius(90.0, 300.0, 1.0);
        assert!((blur - 4.05).abs() < 1e-9);
    }

    #[test]
    fn test_glow_formula_constant_ignores_angle() {
        let a = GlowMode::Constant.blur_radius(10.0, 300.0, 0.5);
        let b = GlowMode::Constant.blur_radius(350.0, 300.0, 0.5);
        assert_eq!(a, b);
        assert!((a - 360.0 * 300.0 * 0.000_15 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_glow_formula_reverse_and_none() {
        let blur = GlowMode::Reverse.blur_radius(90.0, 300.0, 1.0);
        assert!((blur - 270.0 * 300.0 * 0.000_15).abs() < 1e-9);
        assert_eq!(GlowMode::NoGlow.blur_radius(90.0, 300.0, 1.0), 0.0);
    }

    #[test]
    fn test_set_colors_bumps_palette_revision() {
        let mut ring = new(&[]);
        let before = ring.palette_rev;
        ring.set_colors(vec![DEFAULT_COLORS[0]]);
        assert_eq!(ring.palette_rev, before + 1);
    }

    #[test]
    fn test_default_implementation() {
        let ring = Ring::default();
        assert_eq!(ring.progress(), 0.0);
        assert!(ring.clockwise());
    }
}
