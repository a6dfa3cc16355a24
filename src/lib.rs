#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/circular-progress/")]

//! # circular-progress
//!
//! A custom-drawn circular progress indicator widget: a ring with a track,
//! an animated progress arc (optional glow, rounded caps, solid/gradient/
//! interpolated coloring) and angle-based animation.
//!
//! The widget is host-toolkit agnostic. Two thin capability boundaries
//! keep it that way:
//!
//! - [`render::Surface`] is the host's canvas. The ring hands it
//!   [`kurbo`] paths and [`peniko`] brushes in back-to-front order; the
//!   host rasterizes them however it likes. A [`render::Recorder`] is
//!   included for headless use and tests.
//! - [`animation::AnimationEngine`] is the host's property-animation
//!   engine. The ring submits timed interpolations of its angle, queries
//!   the live value mid-flight and cancels synchronously; it never
//!   advances time itself. [`animation::ClockEngine`] (wall clock) and
//!   [`animation::ManualEngine`] (explicitly driven) are included.
//!
//! ## Basic Usage
//!
//! ```rust
//! use circular_progress::prelude::*;
//! use circular_progress::render::Recorder;
//! use kurbo::Size;
//!
//! // Configure with the option pattern.
//! let mut ring = ring_new(&[
//!     with_start_angle(-90.0),
//!     with_progress_thickness(0.6),
//! ]);
//!
//! // The host layout pass supplies the bounds.
//! ring.set_bounds(Size::new(300.0, 300.0));
//!
//! // Drive it and draw each frame.
//! ring.set_progress(0.4);
//! let mut surface = Recorder::default();
//! ring.draw(&mut surface);
//! ```
//!
//! ## Animation
//!
//! ```rust
//! use circular_progress::prelude::*;
//! use std::time::Duration;
//!
//! let mut ring = ring_new(&[]);
//! ring.animate(
//!     0.0,
//!     360.0,
//!     Duration::from_secs(2),
//!     true,
//!     Some(Box::new(|finished| {
//!         if finished {
//!             // ran to completion
//!         }
//!     })),
//! );
//!
//! // The model angle reflects the end state immediately; only the
//! // presentation interpolates.
//! assert_eq!(ring.angle(), 360.0);
//!
//! // Each frame: let the state machine observe completion, then draw
//! // with `ring.display_angle()` tracking the live value.
//! ring.tick();
//! ```
//!
//! ## Properties
//!
//! All scalar properties are clamped or normalized silently at the setter
//! boundary; there are no error returns. `angle` is unbounded and
//! normalized on read; `progress` is its `[0, 1]` view. Thickness ratios
//! and glow amount clamp to `[0, 1]`. The coloring policy follows the
//! color count: white when empty, flat for one, a linear gradient for two
//! or more, or one progress-blended color per frame in lerp-color mode.

pub mod angle;
pub mod animation;
pub mod color;
pub mod render;
pub mod ring;

pub use animation::{AnimationEngine, AnimationHandle, ClockEngine, CompletionFn, ManualEngine};
pub use render::{Recorder, Surface, SurfaceOp};
pub use ring::{
    counterclockwise, new as ring_new, with_colors, with_glow, with_gradient_rotate_speed,
    with_inside_fill, with_lerp_color_mode, with_progress_thickness, with_size, with_start_angle,
    with_track_color, with_track_thickness, without_rounded_corners, GlowMode, Ring, RingOption,
    DEFAULT_COLORS,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use circular_progress::prelude::*;
///
/// let ring = ring_new(&[with_lerp_color_mode()]);
/// assert!(ring.lerp_color_mode());
/// ```
pub mod prelude {
    pub use crate::animation::{
        AnimationEngine, AnimationHandle, ClockEngine, CompletionFn, ManualEngine,
    };
    pub use crate::render::{Recorder, Surface, SurfaceOp};
    pub use crate::ring::{
        counterclockwise, new as ring_new, with_colors, with_glow, with_gradient_rotate_speed,
        with_inside_fill, with_lerp_color_mode, with_progress_thickness, with_size,
        with_start_angle, with_track_color, with_track_thickness, without_rounded_corners,
        GlowMode, Ring, RingOption, DEFAULT_COLORS,
    };
}
