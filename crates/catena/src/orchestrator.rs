//! Orchestration of all diagram animations in a document.
//!
//! [`Orchestrator::initialize`] is the single entry point. It checks the
//! engine, installs the shared arrowhead marker, and wires every diagram it
//! finds, in a fixed order:
//!
//! 1. morphism arrows
//! 2. object nodes (entrance and pulse)
//! 3. commutative diagrams
//! 4. functor mappings
//! 5. natural transformations
//! 6. hover feedback
//! 7. composition play controls
//! 8. monads
//! 9. adjunctions
//! 10. smooth scrolling for in-page links
//!
//! The returned [`Orchestration`] owns the engine and every gate and handler.
//! The host routes visibility crossings, playback milestones, pointer and
//! click events into it, and finally calls [`Orchestration::teardown`].

use std::{collections::HashMap, fmt};

use indexmap::IndexMap;
use log::{debug, error, info, trace, warn};

use catena_core::draw::{ARROWHEAD_MARKER_ID, build_arrowhead_marker};

use crate::{
    CatenaError,
    compose::{self, GatedTimeline},
    config::AppConfig,
    document::{Document, ElementId},
    engine::{AnimationEngine, PlaybackEvent, PlaybackId, TriggerId},
    interaction::{ClickOutcome, InteractionLayer, Pointer, ScrollSettings},
    selector::ElementSelector,
    visibility::{Crossing, GateBinding, GateCommand, GateState, VisibilityGate},
};

/// Counts of what an orchestration wired up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub morphism_arrows: usize,
    pub object_nodes: usize,
    pub commutative_diagrams: usize,
    pub functor_diagrams: usize,
    pub natural_transformations: usize,
    pub monad_diagrams: usize,
    pub adjunction_diagrams: usize,
    pub composition_diagrams: usize,
    pub hover_targets: usize,
    pub links: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "morphism arrows:         {}", self.morphism_arrows)?;
        writeln!(f, "object nodes:            {}", self.object_nodes)?;
        writeln!(f, "commutative diagrams:    {}", self.commutative_diagrams)?;
        writeln!(f, "functor diagrams:        {}", self.functor_diagrams)?;
        writeln!(f, "natural transformations: {}", self.natural_transformations)?;
        writeln!(f, "monad diagrams:          {}", self.monad_diagrams)?;
        writeln!(f, "adjunction diagrams:     {}", self.adjunction_diagrams)?;
        writeln!(f, "composition diagrams:    {}", self.composition_diagrams)?;
        writeln!(f, "hover targets:           {}", self.hover_targets)?;
        write!(f, "in-page links:           {}", self.links)
    }
}

/// Builder for an [`Orchestration`].
///
/// # Examples
///
/// A missing engine is reported before anything touches the document:
///
/// ```
/// use catena::{CatenaError, Orchestrator, config::AppConfig};
/// use catena::{document::MemoryDocument, engine::RecordingEngine};
///
/// let mut document = MemoryDocument::new();
/// let result = Orchestrator::<RecordingEngine>::new(AppConfig::default())
///     .initialize(&mut document);
///
/// assert!(matches!(result, Err(CatenaError::MissingEngine)));
/// assert!(document.markers().is_empty());
/// ```
#[derive(Debug)]
pub struct Orchestrator<E> {
    config: AppConfig,
    engine: Option<E>,
}

impl<E: AnimationEngine> Orchestrator<E> {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            engine: None,
        }
    }

    /// Supplies the engine that plays composed timelines.
    pub fn with_engine(mut self, engine: E) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Wires every diagram in `document`.
    ///
    /// # Errors
    ///
    /// - [`CatenaError::MissingEngine`] if no engine was supplied.
    /// - [`CatenaError::MissingCapability`] if the engine cannot tween,
    ///   sequence, repeat or observe visibility.
    /// - [`CatenaError::Config`] if the configuration is invalid.
    ///
    /// Nothing is installed or subscribed when an error is returned.
    pub fn initialize<D: Document + ?Sized>(
        self,
        document: &mut D,
    ) -> Result<Orchestration<E>, CatenaError> {
        let Some(engine) = self.engine else {
            let err = CatenaError::MissingEngine;
            error!(err:%; "Cannot animate diagrams");
            return Err(err);
        };

        let capabilities = engine.capabilities();
        let missing = capabilities.missing_required();
        if !missing.is_empty() {
            let err = CatenaError::MissingCapability(missing);
            error!(err:%; "Cannot animate diagrams");
            return Err(err);
        }

        self.config.validate()?;

        if document.has_marker(ARROWHEAD_MARKER_ID) {
            debug!(id = ARROWHEAD_MARKER_ID; "Marker already present, not installing");
        } else {
            document.install_marker(build_arrowhead_marker());
        }

        let interaction = self.config.interaction();
        let mut orchestration = Orchestration {
            engine,
            gates: IndexMap::new(),
            playbacks: HashMap::new(),
            looping: Vec::new(),
            interactions: InteractionLayer::new(ScrollSettings {
                offset: interaction.scroll_offset(),
                duration: interaction.scroll_duration(),
            }),
            summary: Summary::default(),
        };

        let selector = ElementSelector::new(&*document);
        let arrows = selector.morphism_arrows();
        let nodes = selector.object_nodes();
        let commutative = selector.commutative_diagrams();
        let functors = selector.functor_diagrams();
        let natural_transformations = selector.natural_transformations();
        let hover_nodes = selector.hoverable_nodes();
        let hover_arrows = selector.hoverable_arrows();
        let compositions = selector.composition_diagrams();
        let monads = selector.monad_diagrams();
        let adjunctions = selector.adjunction_diagrams();
        let links = selector.in_page_links();

        let summary = &mut orchestration.summary;
        summary.morphism_arrows = arrows.len();
        summary.object_nodes = nodes.len();
        summary.commutative_diagrams = commutative.len();
        summary.functor_diagrams = functors.len();
        summary.natural_transformations = natural_transformations.len();
        summary.monad_diagrams = monads.len();
        summary.adjunction_diagrams = adjunctions.len();
        summary.composition_diagrams = compositions.len();

        for (index, arrow) in arrows.into_iter().enumerate() {
            orchestration.gate(compose::morphism_arrow(arrow, index));
        }

        for node in nodes {
            orchestration.gate(compose::object_entrance(node));
            let pulse = orchestration.engine.start(&compose::object_pulse(node));
            orchestration.looping.push(pulse);
        }

        for parts in &commutative {
            orchestration.gate(compose::commutative(parts));
        }
        for parts in &functors {
            orchestration.gate(compose::functor(parts));
        }
        for parts in &natural_transformations {
            orchestration.gate(compose::natural_transformation(parts));
        }

        if interaction.hover() {
            for node in hover_nodes {
                orchestration.interactions.bind_node_hover(document, node);
            }
            for arrow in hover_arrows {
                orchestration.interactions.bind_arrow_hover(document, arrow);
            }
            orchestration.summary.hover_targets = orchestration.interactions.len() / 2;
        }

        for parts in compositions {
            orchestration.interactions.bind_composition(document, parts);
        }

        for parts in &monads {
            orchestration.gate(compose::monad(parts));
        }
        for parts in &adjunctions {
            orchestration.gate(compose::adjunction(parts));
        }

        if interaction.smooth_scroll() {
            if capabilities.scroll_to {
                for link in links {
                    if orchestration.interactions.bind_link(document, link) {
                        orchestration.summary.links += 1;
                    }
                }
            } else {
                warn!("Engine cannot scroll the window, smooth scrolling disabled");
            }
        }

        let summary = orchestration.summary;
        info!(
            arrows = summary.morphism_arrows,
            nodes = summary.object_nodes,
            gates = orchestration.gates.len(),
            listeners = orchestration.interactions.len();
            "Diagram animations initialized"
        );

        Ok(orchestration)
    }
}

#[derive(Debug, Clone)]
struct GateEntry {
    playback: PlaybackId,
    gate: VisibilityGate,
}

/// Live animation state for one orchestrated document.
#[derive(Debug)]
pub struct Orchestration<E> {
    engine: E,
    gates: IndexMap<TriggerId, GateEntry>,
    playbacks: HashMap<PlaybackId, TriggerId>,
    looping: Vec<PlaybackId>,
    interactions: InteractionLayer,
    summary: Summary,
}

impl<E: AnimationEngine> Orchestration<E> {
    /// Creates the gated timeline paused and starts observing its trigger.
    fn gate(&mut self, gated: Option<GatedTimeline>) {
        let Some(gated) = gated else {
            return;
        };
        let (timeline, binding) = gated.into_parts();
        let playback = self.engine.create(&timeline);
        let trigger = self.engine.observe(binding.trigger(), binding.threshold());
        if timeline.repeat().is_infinite() {
            self.looping.push(playback);
        }
        trace!(
            timeline = timeline.name(),
            trigger:%,
            threshold:% = binding.threshold();
            "Gate registered"
        );
        self.playbacks.insert(playback, trigger);
        self.gates.insert(
            trigger,
            GateEntry {
                playback,
                gate: VisibilityGate::new(binding),
            },
        );
    }

    /// Routes a threshold crossing reported for `trigger`.
    ///
    /// Returns the command issued to the engine, if any.
    pub fn on_crossing(&mut self, trigger: TriggerId, crossing: Crossing) -> Option<GateCommand> {
        let entry = self.gates.get_mut(&trigger)?;
        let command = entry.gate.on_crossing(crossing)?;
        match command {
            GateCommand::Play => self.engine.play(entry.playback),
            GateCommand::Restart => self.engine.restart(entry.playback),
            GateCommand::Reverse => self.engine.reverse(entry.playback),
        }
        Some(command)
    }

    /// Routes a playback milestone reported by the engine.
    pub fn on_playback(&mut self, playback: PlaybackId, event: PlaybackEvent) {
        let Some(trigger) = self.playbacks.get(&playback) else {
            trace!(playback:%; "Playback is not gated");
            return;
        };
        if let Some(entry) = self.gates.get_mut(trigger) {
            entry.gate.on_playback(event);
        }
    }

    /// Routes a pointer transition over `element`.
    pub fn on_pointer(&mut self, element: ElementId, pointer: Pointer) -> Option<PlaybackId> {
        self.interactions
            .on_pointer(&mut self.engine, element, pointer)
    }

    /// Routes a click on `element`.
    pub fn on_click<D: Document + ?Sized>(
        &mut self,
        document: &D,
        element: ElementId,
    ) -> ClickOutcome {
        self.interactions
            .on_click(document, &mut self.engine, element)
    }

    pub fn gate_state(&self, trigger: TriggerId) -> Option<GateState> {
        self.gates.get(&trigger).map(|entry| entry.gate.state())
    }

    /// Every gate in registration order.
    pub fn gates(&self) -> impl Iterator<Item = (TriggerId, &GateBinding, PlaybackId)> {
        self.gates
            .iter()
            .map(|(trigger, entry)| (*trigger, entry.gate.binding(), entry.playback))
    }

    /// Gates whose trigger is `element`, in registration order.
    pub fn gates_for(&self, element: ElementId) -> Vec<TriggerId> {
        self.gates
            .iter()
            .filter(|(_, entry)| entry.gate.binding().trigger() == element)
            .map(|(trigger, _)| *trigger)
            .collect()
    }

    /// Timelines that repeat forever, pulses included.
    pub fn looping(&self) -> &[PlaybackId] {
        &self.looping
    }

    pub fn interactions(&self) -> &InteractionLayer {
        &self.interactions
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Stops everything this orchestration started and hands the engine
    /// back.
    ///
    /// Kills every infinitely repeating timeline, stops observing every
    /// trigger and removes every event subscription from `document`.
    pub fn teardown<D: Document + ?Sized>(mut self, document: &mut D) -> E {
        for playback in self.looping.drain(..) {
            self.engine.kill(playback);
        }
        for trigger in self.gates.keys() {
            self.engine.unobserve(*trigger);
        }
        self.interactions.detach(document);
        info!(gates = self.gates.len(); "Diagram animations torn down");
        self.engine
    }
}
