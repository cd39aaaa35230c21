//! The animation engine seam.
//!
//! Catena composes timelines; an [`AnimationEngine`] plays them. The engine
//! is also the source of visibility crossings: Catena asks it to observe a
//! trigger element at a [`Threshold`] and the host reports crossings back
//! through [`Orchestration::on_crossing`](crate::Orchestration::on_crossing).
//!
//! [`RecordingEngine`] records every command instead of animating and is
//! the engine used by tests and the command line preview.

use std::fmt;

use log::trace;

use crate::{document::ElementId, timeline::{Ease, Timeline}, visibility::Threshold};

/// Handle to a timeline instance created by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaybackId(u64);

impl PlaybackId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playback-{}", self.0)
    }
}

/// Handle to a visibility observation created by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerId(u64);

impl TriggerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trigger-{}", self.0)
    }
}

/// Features an engine supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Single property tweens.
    pub tween: bool,
    /// Sequenced timelines with positioned steps.
    pub timeline: bool,
    /// Repeating timelines, including infinite and yoyo repeats.
    pub repeat: bool,
    /// Visibility observation of trigger elements.
    pub scroll_trigger: bool,
    /// Animated window scrolling.
    pub scroll_to: bool,
}

impl Capabilities {
    /// Every capability present.
    pub fn all() -> Self {
        Self {
            tween: true,
            timeline: true,
            repeat: true,
            scroll_trigger: true,
            scroll_to: true,
        }
    }

    /// Names of the capabilities orchestration cannot do without.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("tween", self.tween),
            ("timeline", self.timeline),
            ("repeat", self.repeat),
            ("scroll trigger", self.scroll_trigger),
        ]
        .into_iter()
        .filter_map(|(name, present)| (!present).then_some(name))
        .collect()
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// Playback milestones an engine reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Forward playback reached the end.
    Completed,
    /// Reverse playback reached the start.
    ReverseCompleted,
}

/// A request to scroll the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    /// Absolute vertical offset to scroll to.
    pub y: f64,
    /// Duration in seconds.
    pub duration: f64,
    pub ease: Ease,
}

/// A tweening engine.
///
/// Timelines are created paused. Every control method accepts ids of
/// killed or unknown timelines and ignores them.
pub trait AnimationEngine {
    fn capabilities(&self) -> Capabilities;

    /// Creates a paused instance of `timeline`.
    fn create(&mut self, timeline: &Timeline) -> PlaybackId;

    /// Plays forward from the current position.
    fn play(&mut self, playback: PlaybackId);

    /// Plays forward from the start.
    fn restart(&mut self, playback: PlaybackId);

    /// Plays backward from the current position.
    fn reverse(&mut self, playback: PlaybackId);

    /// Stops and discards a timeline instance.
    fn kill(&mut self, playback: PlaybackId);

    /// Starts observing `trigger` crossing the viewport line at `threshold`.
    fn observe(&mut self, trigger: ElementId, threshold: Threshold) -> TriggerId;

    /// Stops an observation.
    fn unobserve(&mut self, trigger: TriggerId);

    /// Scrolls the window. Only called when `capabilities().scroll_to` is set.
    fn scroll_to(&mut self, request: ScrollRequest);

    /// Creates a timeline instance and plays it immediately.
    fn start(&mut self, timeline: &Timeline) -> PlaybackId {
        let playback = self.create(timeline);
        self.play(playback);
        playback
    }
}

/// A command received by a [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    Create(PlaybackId),
    Play(PlaybackId),
    Restart(PlaybackId),
    Reverse(PlaybackId),
    Kill(PlaybackId),
    Observe {
        trigger: TriggerId,
        element: ElementId,
        threshold: Threshold,
    },
    Unobserve(TriggerId),
    ScrollTo(ScrollRequest),
}

/// An engine that records commands instead of animating.
#[derive(Debug, Clone)]
pub struct RecordingEngine {
    capabilities: Capabilities,
    timelines: Vec<(PlaybackId, Timeline)>,
    observed: Vec<(TriggerId, ElementId, Threshold)>,
    commands: Vec<EngineCommand>,
    next_playback: u64,
    next_trigger: u64,
}

impl RecordingEngine {
    /// Creates an engine with every capability.
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::all())
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            timelines: Vec::new(),
            observed: Vec::new(),
            commands: Vec::new(),
            next_playback: 0,
            next_trigger: 0,
        }
    }

    /// Every command in the order received.
    pub fn commands(&self) -> &[EngineCommand] {
        &self.commands
    }

    /// Timelines created so far, killed ones included.
    pub fn timelines(&self) -> impl Iterator<Item = (PlaybackId, &Timeline)> {
        self.timelines
            .iter()
            .map(|(playback, timeline)| (*playback, timeline))
    }

    pub fn timeline(&self, playback: PlaybackId) -> Option<&Timeline> {
        self.timelines
            .iter()
            .find(|(id, _)| *id == playback)
            .map(|(_, timeline)| timeline)
    }

    /// The most recently created timeline instance.
    pub fn last_created(&self) -> Option<(PlaybackId, &Timeline)> {
        self.timelines
            .last()
            .map(|(playback, timeline)| (*playback, timeline))
    }

    /// Active observations in the order they were made.
    pub fn observed(&self) -> &[(TriggerId, ElementId, Threshold)] {
        &self.observed
    }

    /// Whether `playback` received `command`.
    pub fn received(&self, command: &EngineCommand) -> bool {
        self.commands.contains(command)
    }
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationEngine for RecordingEngine {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn create(&mut self, timeline: &Timeline) -> PlaybackId {
        let playback = PlaybackId::new(self.next_playback);
        self.next_playback += 1;
        trace!(playback:%, timeline = timeline.name(); "Recording timeline");
        self.timelines.push((playback, timeline.clone()));
        self.commands.push(EngineCommand::Create(playback));
        playback
    }

    fn play(&mut self, playback: PlaybackId) {
        self.commands.push(EngineCommand::Play(playback));
    }

    fn restart(&mut self, playback: PlaybackId) {
        self.commands.push(EngineCommand::Restart(playback));
    }

    fn reverse(&mut self, playback: PlaybackId) {
        self.commands.push(EngineCommand::Reverse(playback));
    }

    fn kill(&mut self, playback: PlaybackId) {
        self.commands.push(EngineCommand::Kill(playback));
    }

    fn observe(&mut self, element: ElementId, threshold: Threshold) -> TriggerId {
        let trigger = TriggerId::new(self.next_trigger);
        self.next_trigger += 1;
        self.observed.push((trigger, element, threshold));
        self.commands.push(EngineCommand::Observe {
            trigger,
            element,
            threshold,
        });
        trigger
    }

    fn unobserve(&mut self, trigger: TriggerId) {
        self.observed.retain(|(id, _, _)| *id != trigger);
        self.commands.push(EngineCommand::Unobserve(trigger));
    }

    fn scroll_to(&mut self, request: ScrollRequest) {
        self.commands.push(EngineCommand::ScrollTo(request));
    }
}
