//! Timeline model.
//!
//! A [`Timeline`] is an ordered list of [`Step`]s. Each step tweens a set of
//! target elements between property values over a duration, optionally
//! staggering the start of each target. Steps are placed with a
//! [`Position`] relative to the step before them, which lets authored
//! sequences overlap.
//!
//! Timelines are plain data. Playing them is the job of an
//! [`AnimationEngine`](crate::engine::AnimationEngine); [`Timeline::schedule`]
//! flattens a timeline to absolute times for engines and previews that need
//! them.
//!
//! # Examples
//!
//! ```
//! use catena::document::ElementId;
//! use catena::timeline::{Ease, Position, Properties, Property, Step, Timeline, Tween};
//!
//! let fade_in = Tween::From(Properties::new().with(Property::Opacity, 0.0));
//! let timeline = Timeline::new("demo")
//!     .with_step(Step::new(vec![ElementId::new(1)], fade_in.clone(), 0.8))
//!     .with_step(
//!         Step::new(vec![ElementId::new(2)], fade_in, 0.6)
//!             .with_ease(Ease::Power2InOut)
//!             .at(Position::Relative(-0.3)),
//!     );
//!
//! let schedule = timeline.schedule();
//! assert_eq!(schedule[1].start(), 0.5);
//! assert_eq!(timeline.duration(), 1.1);
//! ```

mod ease;
mod property;

use std::fmt;

use log::trace;

use crate::document::ElementId;

pub use ease::{DEFAULT_OVERSHOOT, Ease, UnknownEase};
pub use property::{Properties, Property, Value};

/// How a step changes its targets' properties.
#[derive(Debug, Clone, PartialEq)]
pub enum Tween {
    /// Animate from these values to the current ones.
    From(Properties),
    /// Animate from the current values to these.
    To(Properties),
    /// Animate between explicit start and end values.
    FromTo { from: Properties, to: Properties },
}

impl Tween {
    /// Values the targets end up with, if the tween names them.
    pub fn end_values(&self) -> Option<&Properties> {
        match self {
            Self::From(_) => None,
            Self::To(to) | Self::FromTo { to, .. } => Some(to),
        }
    }
}

impl fmt::Display for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From(from) => write!(f, "from {from}"),
            Self::To(to) => write!(f, "to {to}"),
            Self::FromTo { from, to } => write!(f, "from {from} to {to}"),
        }
    }
}

/// Placement of a step relative to the step before it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Position {
    /// Start when the previous step ends.
    #[default]
    Sequence,
    /// Start at the previous step's end plus an offset; negative offsets
    /// overlap the previous step.
    Relative(f64),
    /// Start at a fixed time from the start of the timeline.
    Absolute(f64),
}

impl Position {
    fn resolve(self, previous_end: f64) -> f64 {
        let start = match self {
            Self::Sequence => previous_end,
            Self::Relative(offset) => previous_end + offset,
            Self::Absolute(time) => time,
        };
        start.max(0.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence => write!(f, ">"),
            Self::Relative(offset) if *offset < 0.0 => write!(f, "-={}", -offset),
            Self::Relative(offset) => write!(f, "+={offset}"),
            Self::Absolute(time) => write!(f, "{time}"),
        }
    }
}

/// One tween over a set of targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    targets: Vec<ElementId>,
    tween: Tween,
    duration: f64,
    ease: Ease,
    stagger: f64,
    position: Position,
}

impl Step {
    /// Creates a step with the default ease, no stagger, placed in sequence.
    pub fn new(targets: Vec<ElementId>, tween: Tween, duration: f64) -> Self {
        Self {
            targets,
            tween,
            duration,
            ease: Ease::default(),
            stagger: 0.0,
            position: Position::Sequence,
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Delays each successive target's start by `stagger` seconds.
    pub fn with_stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    pub fn stagger(&self) -> f64 {
        self.stagger
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Time from the first target's start to the last target's end.
    pub fn span(&self) -> f64 {
        let staggered = self.targets.len().saturating_sub(1) as f64;
        self.duration + self.stagger * staggered
    }
}

/// How many times a timeline plays after its first run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Finite(u32),
    Infinite,
}

impl Repeat {
    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }
}

impl Default for Repeat {
    fn default() -> Self {
        Self::Finite(0)
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(count) => write!(f, "{count}"),
            Self::Infinite => write!(f, "infinite"),
        }
    }
}

/// A step placed at absolute time by [`Timeline::schedule`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledStep {
    index: usize,
    start: f64,
    end: f64,
    duration: f64,
    stagger: f64,
    ease: Ease,
}

impl ScheduledStep {
    /// Index of the step within its timeline.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Eased progress of the target at `target` at timeline time `time`.
    pub fn progress(&self, target: usize, time: f64) -> f64 {
        let target_start = self.start + self.stagger * target as f64;
        if self.duration <= 0.0 {
            return if time >= target_start { 1.0 } else { 0.0 };
        }
        self.ease.apply((time - target_start) / self.duration)
    }
}

/// An ordered, possibly repeating sequence of steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    name: String,
    steps: Vec<Step>,
    repeat: Repeat,
    repeat_delay: f64,
    yoyo: bool,
}

impl Timeline {
    /// Creates an empty timeline that plays once.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            repeat: Repeat::default(),
            repeat_delay: 0.0,
            yoyo: false,
        }
    }

    /// Appends a step. Steps without targets are dropped.
    pub fn push(&mut self, step: Step) {
        if step.targets.is_empty() {
            trace!(timeline = self.name.as_str(); "Skipping step without targets");
            return;
        }
        self.steps.push(step);
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.push(step);
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Sets the pause between repetitions, in seconds.
    pub fn with_repeat_delay(mut self, delay: f64) -> Self {
        self.repeat_delay = delay;
        self
    }

    /// Alternates direction on every repetition.
    pub fn with_yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    pub fn repeat_delay(&self) -> f64 {
        self.repeat_delay
    }

    pub fn yoyo(&self) -> bool {
        self.yoyo
    }

    /// Places every step at absolute time within one run of the timeline.
    ///
    /// Each step is positioned against the end of the step before it (the
    /// first step against time zero). Starts that would fall before zero are
    /// clamped to zero.
    pub fn schedule(&self) -> Vec<ScheduledStep> {
        let mut previous_end = 0.0;
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let start = step.position.resolve(previous_end);
                let end = start + step.span();
                previous_end = end;
                ScheduledStep {
                    index,
                    start,
                    end,
                    duration: step.duration,
                    stagger: step.stagger,
                    ease: step.ease,
                }
            })
            .collect()
    }

    /// Length of one run, the latest end of any step.
    pub fn duration(&self) -> f64 {
        self.schedule()
            .iter()
            .map(ScheduledStep::end)
            .fold(0.0, f64::max)
    }

    /// Length of all runs including repeat delays, `None` when the timeline
    /// repeats forever.
    pub fn total_duration(&self) -> Option<f64> {
        match self.repeat {
            Repeat::Infinite => None,
            Repeat::Finite(count) => {
                let count = f64::from(count);
                Some(self.duration() * (count + 1.0) + self.repeat_delay * count)
            }
        }
    }
}
