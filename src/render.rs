//! Per-frame drawing of the ring onto an abstract surface.
//!
//! The host toolkit's canvas is an external collaborator: this module only
//! decides *what* to draw (track circle, masked progress arc, fill brush)
//! and hands kurbo paths and peniko brushes to a [`Surface`] the host
//! implements. A [`Recorder`] surface is provided for headless hosts and
//! tests.
//!
//! The draw routine is a pure function of the ring state except for the
//! gradient cache: stop locations and color stops are derived lazily and
//! kept until the geometry or palette they were computed for changes.

use crate::angle;
use crate::color;
use crate::ring::Ring;
use kurbo::{Arc, BezPath, Cap, Circle, Point, Rect, Shape, Stroke, Vec2};
use peniko::{Brush, Color, ColorStop, Gradient};
use std::f64::consts::PI;

/// Flattening tolerance for arc and circle paths.
const TOLERANCE: f64 = 0.1;

const WHITE: Color = Color::new([1.0, 1.0, 1.0, 1.0]);

/// Drawing sink implemented by the host toolkit.
///
/// Calls arrive in back-to-front order on the UI thread. Masks nest: after
/// [`Surface::push_mask`], drawing is clipped to the area covered by
/// stroking the mask path (softened outward by the blur radius, which is
/// how the glow halo picks up the arc's fill color) until the matching
/// [`Surface::pop_mask`].
pub trait Surface {
    /// Fills `path` with `brush`.
    fn fill(&mut self, path: &BezPath, brush: &Brush);

    /// Strokes `path` with `style` and `brush`.
    fn stroke(&mut self, path: &BezPath, style: &Stroke, brush: &Brush);

    /// Clips subsequent drawing to the stroked outline of `mask`,
    /// softened by `blur` pixels.
    fn push_mask(&mut self, mask: &BezPath, style: &Stroke, blur: f64);

    /// Ends the innermost mask.
    fn pop_mask(&mut self);
}

/// One recorded [`Surface`] call.
#[derive(Debug, Clone)]
pub enum SurfaceOp {
    /// A [`Surface::fill`] call.
    Fill {
        /// The filled path.
        path: BezPath,
        /// The fill brush.
        brush: Brush,
    },
    /// A [`Surface::stroke`] call.
    Stroke {
        /// The stroked path.
        path: BezPath,
        /// The stroke style, including width and caps.
        style: Stroke,
        /// The stroke brush.
        brush: Brush,
    },
    /// A [`Surface::push_mask`] call.
    PushMask {
        /// The mask path.
        path: BezPath,
        /// The style the mask is stroked with.
        style: Stroke,
        /// The glow blur radius in pixels.
        blur: f64,
    },
    /// A [`Surface::pop_mask`] call.
    PopMask,
}

/// A [`Surface`] that records calls instead of rasterizing them.
///
/// ```rust
/// use circular_progress::prelude::*;
/// use circular_progress::render::Recorder;
/// use kurbo::Size;
///
/// let mut ring = ring_new(&[]);
/// ring.set_bounds(Size::new(300.0, 300.0));
/// ring.set_progress(0.5);
///
/// let mut recorder = Recorder::default();
/// ring.draw(&mut recorder);
/// assert!(!recorder.ops.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Recorder {
    /// The calls recorded so far, in draw order.
    pub ops: Vec<SurfaceOp>,
}

impl Recorder {
    /// Discards all recorded calls.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Surface for Recorder {
    fn fill(&mut self, path: &BezPath, brush: &Brush) {
        self.ops.push(SurfaceOp::Fill {
            path: path.clone(),
            brush: brush.clone(),
        });
    }

    fn stroke(&mut self, path: &BezPath, style: &Stroke, brush: &Brush) {
        self.ops.push(SurfaceOp::Stroke {
            path: path.clone(),
            style: style.clone(),
            brush: brush.clone(),
        });
    }

    fn push_mask(&mut self, mask: &BezPath, style: &Stroke, blur: f64) {
        self.ops.push(SurfaceOp::PushMask {
            path: mask.clone(),
            style: style.clone(),
            blur,
        });
    }

    fn pop_mask(&mut self) {
        self.ops.push(SurfaceOp::PopMask);
    }
}

/// Everything the cached gradient was derived from. A mismatch on any
/// field forces a rebuild on the next draw; properties not listed here
/// (track color, glow, caps) never do.
#[derive(Debug, Clone, PartialEq)]
struct GradientKey {
    palette_rev: u64,
    color_count: usize,
    width: f64,
    radius: f64,
    progress_thickness: f64,
    clockwise: bool,
    rotate_speed: f64,
}

#[derive(Debug)]
struct GradientCache {
    key: GradientKey,
    stops: Vec<ColorStop>,
}

/// Renderer-owned state: the lazily derived gradient cache.
#[derive(Debug, Default)]
pub(crate) struct RenderState {
    cache: Option<GradientCache>,
    /// How many times the gradient stops were recomputed; observable by
    /// tests to pin invalidation behavior.
    pub(crate) rebuilds: u64,
}

impl Ring {
    /// Draws the ring for the current frame onto `surface`.
    ///
    /// Steps: stroke the full track circle (interior filled with the
    /// inside-fill color), push the progress arc as a clip mask (with the
    /// glow blur, if any), fill the masked bounds per the coloring policy,
    /// pop the mask. While animating, the arc follows the engine's live
    /// value ([`Ring::display_angle`]), not the model angle.
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        let width = self.size.width;
        let height = self.size.height;
        let center = Point::new(width / 2.0, height / 2.0);

        let track_line_width = self.radius * self.track_thickness;
        let progress_line_width = self.radius * self.progress_thickness;
        let arc_radius = self.radius - track_line_width.max(progress_line_width) / 2.0;

        let circle = Circle::new(center, arc_radius).to_path(TOLERANCE);
        surface.fill(&circle, &Brush::Solid(self.inside_fill));
        surface.stroke(
            &circle,
            &Stroke::new(track_line_width).with_caps(Cap::Butt),
            &Brush::Solid(self.track_color),
        );

        // Sweep from -startAngle; a full positive turn draws a complete
        // circle rather than wrapping to empty.
        let shown = self.display_angle();
        let sweep = angle::sweep(shown);
        let from = (-self.start_angle).to_radians();
        let to = if self.clockwise {
            (-sweep - self.start_angle).to_radians()
        } else {
            (sweep - self.start_angle).to_radians()
        };
        let arc = Arc::new(
            center,
            Vec2::new(arc_radius, arc_radius),
            from,
            to - from,
            0.0,
        )
        .to_path(TOLERANCE);

        let cap = if self.rounded_corners {
            Cap::Round
        } else {
            Cap::Butt
        };
        let blur = self.glow_mode.blur_radius(sweep, width, self.glow_amount);
        surface.push_mask(&arc, &Stroke::new(progress_line_width).with_caps(cap), blur);

        let bounds = Rect::new(0.0, 0.0, width, height).to_path(TOLERANCE);
        let brush = self.fill_brush(shown);
        surface.fill(&bounds, &brush);
        surface.pop_mask();
    }

    /// Coloring policy: no colors falls back to white, one color fills
    /// flat, lerp mode blends one color for the whole frame, anything else
    /// is a linear gradient. Zero- and one-color palettes never reach
    /// gradient construction, so malformed stop data is unreachable by
    /// construction.
    fn fill_brush(&mut self, shown_angle: f64) -> Brush {
        if self.colors.is_empty() {
            Brush::Solid(WHITE)
        } else if self.colors.len() == 1 {
            Brush::Solid(self.colors[0])
        } else if self.lerp_color_mode {
            let t = angle::sweep(shown_angle) / 360.0;
            Brush::Solid(color::lerp_palette(t, &self.colors))
        } else {
            Brush::Gradient(self.linear_gradient(shown_angle))
        }
    }

    /// Builds the gradient for this frame, reusing cached stop locations
    /// while the key they were derived from still matches. The start/end
    /// points rotate with the angle every frame and are not cached.
    fn linear_gradient(&mut self, shown_angle: f64) -> Gradient {
        let key = GradientKey {
            palette_rev: self.palette_rev,
            color_count: self.colors.len(),
            width: self.size.width,
            radius: self.radius,
            progress_thickness: self.progress_thickness,
            clockwise: self.clockwise,
            rotate_speed: self.gradient_rotate_speed,
        };

        let stops = match &self.renderer.cache {
            Some(cache) if cache.key == key => cache.stops.clone(),
            _ => {
                let locations = color::gradient_locations(
                    self.colors.len(),
                    self.size.width,
                    self.radius,
                    self.radius * self.progress_thickness,
                );
                let stops: Vec<ColorStop> = locations
                    .iter()
                    .zip(self.colors.iter())
                    .map(|(&location, &color)| ColorStop::from((location as f32, color)))
                    .collect();
                self.renderer.rebuilds += 1;
                self.renderer.cache = Some(GradientCache {
                    key,
                    stops: stops.clone(),
                });
                stops
            }
        };

        let half_x = self.size.width / 2.0;
        let rotate_speed = if self.clockwise {
            self.gradient_rotate_speed
        } else {
            -self.gradient_rotate_speed
        };
        let angle_rad = (rotate_speed * shown_angle - 90.0).to_radians();
        let opposite = if angle_rad > PI {
            angle_rad - PI
        } else {
            angle_rad + PI
        };
        let start = Point::new(
            angle_rad.cos() * half_x + half_x,
            angle_rad.sin() * half_x + half_x,
        );
        let end = Point::new(
            opposite.cos() * half_x + half_x,
            opposite.sin() * half_x + half_x,
        );
        Gradient::new_linear(start, end).with_stops(stops.as_slice())
    }
}
