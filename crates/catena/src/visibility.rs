//! Visibility gating.
//!
//! A gated timeline is bound to a trigger element and a viewport
//! [`Threshold`]. When the trigger's top edge scrolls past the threshold line
//! the timeline plays; if the gate is reversible, scrolling back above the
//! line plays it in reverse.
//!
//! Each [`VisibilityGate`] is a small state machine:
//!
//! | State | Event | Next | Engine |
//! |-------|-------|------|--------|
//! | `Idle` | forward | `Playing` | play from start |
//! | `Playing` | completed | `Played` | |
//! | `Playing`, `Played` | backward, reversible | `Reversing` | reverse in place |
//! | `Reversing` | reverse completed | `Idle` | |
//! | `Reversing` | forward | `Playing` | resume forward |
//!
//! Everything else leaves the state unchanged. A gate that is not
//! reversible therefore ends in `Played` for good.

use std::fmt;

use log::trace;

use crate::{document::ElementId, engine::PlaybackEvent};

/// Position of the trigger line, as a fraction of viewport height from the
/// top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold(f64);

impl Threshold {
    /// Creates a threshold, clamping `fraction` to `0..=1`.
    ///
    /// NaN is treated as the bottom edge of the viewport.
    pub fn new(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self(1.0);
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    pub fn fraction(self) -> f64 {
        self.0
    }

    /// Distance of the trigger line from the viewport top.
    pub fn line(self, viewport_height: f64) -> f64 {
        viewport_height * self.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = (self.0 * 100.0 * 1000.0).round() / 1000.0;
        write!(f, "top {percent}%")
    }
}

/// Direction in which a trigger crossed its threshold line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// The trigger scrolled up past the line, into view.
    Forward,
    /// The trigger scrolled back down below the line.
    Backward,
}

impl Crossing {
    /// Derives a crossing from two successive viewport-relative tops of a
    /// trigger element.
    ///
    /// # Examples
    ///
    /// ```
    /// use catena::visibility::{Crossing, Threshold};
    ///
    /// let threshold = Threshold::new(0.8);
    /// assert_eq!(Crossing::detect(900.0, 700.0, 1000.0, threshold), Some(Crossing::Forward));
    /// assert_eq!(Crossing::detect(700.0, 600.0, 1000.0, threshold), None);
    /// ```
    pub fn detect(
        previous_top: f64,
        current_top: f64,
        viewport_height: f64,
        threshold: Threshold,
    ) -> Option<Self> {
        let line = threshold.line(viewport_height);
        if previous_top > line && current_top <= line {
            Some(Self::Forward)
        } else if previous_top <= line && current_top > line {
            Some(Self::Backward)
        } else {
            None
        }
    }
}

/// Trigger element and threshold a timeline is gated on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateBinding {
    trigger: ElementId,
    threshold: Threshold,
    reversible: bool,
}

impl GateBinding {
    pub fn new(trigger: ElementId, threshold: Threshold, reversible: bool) -> Self {
        Self {
            trigger,
            threshold,
            reversible,
        }
    }

    pub fn trigger(&self) -> ElementId {
        self.trigger
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn reversible(&self) -> bool {
        self.reversible
    }
}

/// Playback state of a gated timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Idle,
    Playing,
    Played,
    Reversing,
}

/// What the engine must do after a gate transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateCommand {
    /// Play forward from the current position.
    Play,
    /// Play forward from the start.
    Restart,
    /// Play backward from the current position.
    Reverse,
}

/// State machine for one gated timeline.
#[derive(Debug, Clone)]
pub struct VisibilityGate {
    binding: GateBinding,
    state: GateState,
    started: bool,
}

impl VisibilityGate {
    pub fn new(binding: GateBinding) -> Self {
        Self {
            binding,
            state: GateState::Idle,
            started: false,
        }
    }

    pub fn binding(&self) -> &GateBinding {
        &self.binding
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Applies a threshold crossing, returning the engine command to issue.
    pub fn on_crossing(&mut self, crossing: Crossing) -> Option<GateCommand> {
        let (next, command) = match (self.state, crossing) {
            (GateState::Idle, Crossing::Forward) if self.started => {
                (GateState::Playing, GateCommand::Restart)
            }
            (GateState::Idle, Crossing::Forward) => (GateState::Playing, GateCommand::Play),
            (GateState::Reversing, Crossing::Forward) => (GateState::Playing, GateCommand::Play),
            (GateState::Playing | GateState::Played, Crossing::Backward)
                if self.binding.reversible =>
            {
                (GateState::Reversing, GateCommand::Reverse)
            }
            (state, crossing) => {
                trace!(state:?, crossing:?; "Crossing leaves gate unchanged");
                return None;
            }
        };

        trace!(from:? = self.state, to:? = next; "Gate transition");
        self.state = next;
        self.started = true;
        Some(command)
    }

    /// Applies a playback milestone reported by the engine.
    pub fn on_playback(&mut self, event: PlaybackEvent) {
        let next = match (self.state, event) {
            (GateState::Playing, PlaybackEvent::Completed) => GateState::Played,
            (GateState::Reversing, PlaybackEvent::ReverseCompleted) => GateState::Idle,
            (state, event) => {
                trace!(state:?, event:?; "Playback event leaves gate unchanged");
                return;
            }
        };

        trace!(from:? = self.state, to:? = next; "Gate transition");
        self.state = next;
    }
}
