//! Angle animation: the host-engine capability and the ring state machine.
//!
//! The ring never advances time itself. It submits a timed interpolation of
//! its `angle` to an injected [`AnimationEngine`], may query the live
//! interpolated value mid-flight, and cancels synchronously. The model
//! angle is decoupled from the presentation: `animate` writes the target
//! angle to the model immediately, while [`Ring::display_angle`] follows
//! the engine's live value until the interpolation stops.
//!
//! Pause policy: pausing (explicitly, or implicitly via an angle write, a
//! new `animate` call, or detach) fires the stored completion callback
//! with `finished = false` before clearing it, so every `animate` call
//! observes exactly one completion.
//!
//! # Basic Usage
//!
//! ```rust
//! use circular_progress::prelude::*;
//! use std::time::Duration;
//!
//! let mut ring = ring_new(&[]);
//! ring.animate(0.0, 360.0, Duration::from_secs(5), true, None);
//!
//! // The model already reflects the end state while the visual runs.
//! assert_eq!(ring.angle(), 360.0);
//! assert!(ring.is_animating());
//!
//! ring.pause_animation();
//! assert!(!ring.is_animating());
//! ```

use crate::angle;
use crate::ring::Ring;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

// Internal ID management for interpolation handles
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Identifies one in-flight interpolation issued to an [`AnimationEngine`].
///
/// Handles are unique across all engines for the lifetime of the process,
/// which keeps a ring from ever acting on a stale interpolation after a
/// rapid pause/restart sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(i64);

impl AnimationHandle {
    pub(crate) fn next() -> Self {
        AnimationHandle(next_id())
    }
}

/// The capability a host toolkit provides to animate a scalar over time.
///
/// The ring only issues start/cancel requests and reads values; progression
/// of time belongs entirely to the engine. Cancellation is synchronous: the
/// interpolation is gone when [`AnimationEngine::cancel`] returns.
///
/// Two engines ship with the crate: [`ClockEngine`] for wall-clock hosts
/// and [`ManualEngine`] for headless hosts and tests.
pub trait AnimationEngine {
    /// Registers a timed interpolation from `from` to `to` over `duration`
    /// and returns its handle.
    fn start(&mut self, from: f64, to: f64, duration: Duration) -> AnimationHandle;

    /// The live interpolated value, or `None` if the handle is unknown.
    fn value(&self, handle: AnimationHandle) -> Option<f64>;

    /// Whether the interpolation has run its full duration. Unknown
    /// handles count as finished.
    fn is_finished(&self, handle: AnimationHandle) -> bool;

    /// Removes the interpolation.
    fn cancel(&mut self, handle: AnimationHandle);
}

fn interpolate(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[derive(Debug)]
struct Interpolation {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

/// Wall-clock linear interpolation engine; the default for hosts that
/// redraw on a frame clock.
#[derive(Debug, Default)]
pub struct ClockEngine {
    active: HashMap<AnimationHandle, Interpolation>,
}

impl ClockEngine {
    /// Creates an engine with no interpolations in flight.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnimationEngine for ClockEngine {
    fn start(&mut self, from: f64, to: f64, duration: Duration) -> AnimationHandle {
        let handle = AnimationHandle::next();
        self.active.insert(
            handle,
            Interpolation {
                from,
                to,
                started: Instant::now(),
                duration,
            },
        );
        handle
    }

    fn value(&self, handle: AnimationHandle) -> Option<f64> {
        self.active.get(&handle).map(|i| {
            if i.duration.is_zero() {
                return i.to;
            }
            let t = (i.started.elapsed().as_secs_f64() / i.duration.as_secs_f64()).clamp(0.0, 1.0);
            interpolate(i.from, i.to, t)
        })
    }

    fn is_finished(&self, handle: AnimationHandle) -> bool {
        self.active
            .get(&handle)
            .map_or(true, |i| i.started.elapsed() >= i.duration)
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        self.active.remove(&handle);
    }
}

#[derive(Debug)]
struct ManualInterpolation {
    to: f64,
    duration: Duration,
    value: f64,
    finished: bool,
}

/// An engine driven explicitly by the host: the current value only moves
/// when [`ManualEngine::set_value`] is called and an interpolation only
/// completes when [`ManualEngine::finish`] is called.
///
/// Useful for headless hosts that own their own timeline, and for testing
/// the animation state machine without a real rendering engine. Wrap it in
/// `Rc<RefCell<..>>` to keep a driving handle after injecting it:
///
/// ```rust
/// use circular_progress::animation::ManualEngine;
/// use circular_progress::prelude::*;
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let engine = Rc::new(RefCell::new(ManualEngine::new()));
/// let mut ring = ring_new(&[]);
/// ring.set_engine(Box::new(engine.clone()));
///
/// ring.animate(0.0, 180.0, Duration::from_secs(1), true, None);
/// let handle = ring.animation_handle().unwrap();
/// engine.borrow_mut().set_value(handle, 90.0);
/// assert_eq!(ring.display_angle(), 90.0);
/// ```
#[derive(Debug, Default)]
pub struct ManualEngine {
    active: HashMap<AnimationHandle, ManualInterpolation>,
}

impl ManualEngine {
    /// Creates an engine with no interpolations in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the live value of an in-flight interpolation.
    pub fn set_value(&mut self, handle: AnimationHandle, value: f64) {
        if let Some(i) = self.active.get_mut(&handle) {
            i.value = value;
        }
    }

    /// Marks an interpolation as having run to completion, snapping its
    /// value to the target.
    pub fn finish(&mut self, handle: AnimationHandle) {
        if let Some(i) = self.active.get_mut(&handle) {
            i.value = i.to;
            i.finished = true;
        }
    }

    /// The duration the interpolation was registered with.
    pub fn duration(&self, handle: AnimationHandle) -> Option<Duration> {
        self.active.get(&handle).map(|i| i.duration)
    }
}

impl AnimationEngine for ManualEngine {
    fn start(&mut self, from: f64, to: f64, duration: Duration) -> AnimationHandle {
        let handle = AnimationHandle::next();
        self.active.insert(
            handle,
            ManualInterpolation {
                to,
                duration,
                value: from,
                finished: false,
            },
        );
        handle
    }

    fn value(&self, handle: AnimationHandle) -> Option<f64> {
        self.active.get(&handle).map(|i| i.value)
    }

    fn is_finished(&self, handle: AnimationHandle) -> bool {
        self.active.get(&handle).map_or(true, |i| i.finished)
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        self.active.remove(&handle);
    }
}

impl<E: AnimationEngine> AnimationEngine for Rc<RefCell<E>> {
    fn start(&mut self, from: f64, to: f64, duration: Duration) -> AnimationHandle {
        self.borrow_mut().start(from, to, duration)
    }

    fn value(&self, handle: AnimationHandle) -> Option<f64> {
        self.borrow().value(handle)
    }

    fn is_finished(&self, handle: AnimationHandle) -> bool {
        self.borrow().is_finished(handle)
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        self.borrow_mut().cancel(handle)
    }
}

/// Callback invoked exactly once per `animate` call, with `true` if the
/// interpolation ran to completion and `false` if it was interrupted.
pub type CompletionFn = Box<dyn FnOnce(bool)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnimationState {
    Idle,
    Animating(AnimationHandle),
}

pub(crate) struct AnimationRuntime {
    pub(crate) engine: Box<dyn AnimationEngine>,
    pub(crate) state: AnimationState,
    pub(crate) completion: Option<CompletionFn>,
}

impl Default for AnimationRuntime {
    fn default() -> Self {
        Self {
            engine: Box::new(ClockEngine::new()),
            state: AnimationState::Idle,
            completion: None,
        }
    }
}

impl Ring {
    /// Replaces the animation engine, pausing any in-flight animation on
    /// the old one first.
    pub fn set_engine(&mut self, engine: Box<dyn AnimationEngine>) {
        self.pause_if_animating();
        self.animation.engine = engine;
    }

    /// Animates the angle from `from` to `to` degrees.
    ///
    /// If an animation is already in flight it is paused first: the live
    /// interpolated value is captured into `angle` and the old completion
    /// fires with `false`. There is never a visible jump or a silent
    /// double-animation.
    ///
    /// With `relative` set, `duration` is used as given; otherwise it is
    /// rescaled by `normalize(to - from) / 360`, so shorter sweeps take
    /// proportionally less time.
    ///
    /// The model `angle` is set to `to` immediately: callers reading the
    /// angle mid-animation get the final value. Only the presentation
    /// ([`Ring::display_angle`]) interpolates.
    pub fn animate(
        &mut self,
        from: f64,
        to: f64,
        duration: Duration,
        relative: bool,
        completion: Option<CompletionFn>,
    ) {
        self.pause_if_animating();
        let duration = if relative {
            duration
        } else {
            let traveled = angle::normalize(to - from);
            duration.mul_f64(traveled / 360.0)
        };
        let handle = self.animation.engine.start(from, to, duration);
        self.set_angle(to);
        self.animation.completion = completion;
        self.animation.state = AnimationState::Animating(handle);
    }

    /// Animates from the current angle to `to` degrees. See
    /// [`Ring::animate`] for the parameter semantics.
    pub fn animate_to(
        &mut self,
        to: f64,
        duration: Duration,
        relative: bool,
        completion: Option<CompletionFn>,
    ) {
        self.pause_if_animating();
        let from = self.angle;
        self.animate(from, to, duration, relative, completion);
    }

    /// Whether an angle interpolation is currently in flight.
    pub fn is_animating(&self) -> bool {
        matches!(self.animation.state, AnimationState::Animating(_))
    }

    /// The handle of the in-flight interpolation, if any. Hosts that pump
    /// a [`ManualEngine`] use this to address it.
    pub fn animation_handle(&self) -> Option<AnimationHandle> {
        match self.animation.state {
            AnimationState::Animating(handle) => Some(handle),
            AnimationState::Idle => None,
        }
    }

    /// The angle to present this frame: the engine's live interpolated
    /// value while animating, the model angle otherwise.
    pub fn display_angle(&self) -> f64 {
        match self.animation.state {
            AnimationState::Animating(handle) => {
                self.animation.engine.value(handle).unwrap_or(self.angle)
            }
            AnimationState::Idle => self.angle,
        }
    }

    /// Pauses an in-flight animation: reads the live interpolated value,
    /// cancels the interpolation, fires the completion with `false`, and
    /// freezes `angle` at the captured value. No-op when idle.
    pub fn pause_animation(&mut self) {
        let AnimationState::Animating(handle) = self.animation.state else {
            return;
        };
        let live = self.animation.engine.value(handle);
        self.animation.engine.cancel(handle);
        self.animation.state = AnimationState::Idle;
        if let Some(completion) = self.animation.completion.take() {
            completion(false);
        }
        if let Some(value) = live {
            self.set_angle(value);
        }
    }

    pub(crate) fn pause_if_animating(&mut self) {
        if self.is_animating() {
            self.pause_animation();
        }
    }

    /// Cancels any in-flight animation (reporting `finished = false`) and
    /// forces `angle` back to 0, regardless of current state.
    pub fn stop_animation(&mut self) {
        self.pause_if_animating();
        self.angle = 0.0;
    }

    /// Drives completion detection: when the engine reports the in-flight
    /// interpolation finished, fires the completion with `true` and
    /// returns to idle. Hosts call this once per frame (or from their
    /// engine's stop notification).
    pub fn tick(&mut self) {
        let AnimationState::Animating(handle) = self.animation.state else {
            return;
        };
        if self.animation.engine.is_finished(handle) {
            self.animation.engine.cancel(handle);
            self.animation.state = AnimationState::Idle;
            if let Some(completion) = self.animation.completion.take() {
                completion(true);
            }
        }
    }
}
