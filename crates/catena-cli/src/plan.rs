//! Schedule previews for sample diagrams.
//!
//! A preview builds a small in-memory diagram of the requested kind, runs the
//! same selection and composition the orchestrator uses, and flattens the
//! resulting timeline into one line per step.

use std::fmt::{self, Write as _};

use log::debug;

use catena::{
    compose,
    document::{ElementId, ElementSpec, MemoryDocument},
    selector::{self, DiagramKind, ElementSelector},
    timeline::Timeline,
    visibility::GateBinding,
};

use crate::CliError;

/// Shape of the sample diagram to preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    kind: DiagramKind,
    paths: usize,
    labels: usize,
    missing: Vec<String>,
}

impl Sample {
    pub fn new(kind: DiagramKind) -> Self {
        Self {
            kind,
            paths: 3,
            labels: 2,
            missing: Vec::new(),
        }
    }

    /// Sets the number of paths, or of components for a natural
    /// transformation.
    pub fn with_paths(mut self, paths: usize) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_labels(mut self, labels: usize) -> Self {
        self.labels = labels;
        self
    }

    /// Leaves out the optional parts named by class.
    pub fn with_missing(mut self, missing: Vec<String>) -> Self {
        self.missing = missing;
        self
    }

    /// Builds the sample as a document, returning it with the diagram
    /// container.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnknownPart`] when a missing part is not an
    /// optional part of this kind.
    pub fn build(&self) -> Result<(MemoryDocument, ElementId), CliError> {
        let optional = optional_parts(self.kind);
        if let Some(part) = self
            .missing
            .iter()
            .find(|part| !optional.iter().any(|known| *known == part.as_str()))
        {
            let expected = if optional.is_empty() {
                format!("a {} diagram has no optional parts", self.kind)
            } else {
                format!("expected one of: {}", optional.join(", "))
            };
            return Err(CliError::UnknownPart {
                kind: self.kind,
                part: part.clone(),
                expected,
            });
        }

        let mut document = MemoryDocument::new();
        let root = document.root();
        let diagram = document.append(root, ElementSpec::new("div").class(self.kind.class()));

        match self.kind {
            DiagramKind::Commutative => {
                for _ in 0..self.paths {
                    document.append(
                        diagram,
                        ElementSpec::new("path").path_length(selector::DEFAULT_PATH_LENGTH),
                    );
                }
                for _ in 0..self.labels {
                    document.append(diagram, ElementSpec::new("text"));
                }
            }
            DiagramKind::NaturalTransformation => {
                for _ in 0..self.paths {
                    document.append(
                        diagram,
                        ElementSpec::new("circle").class(selector::NT_COMPONENT),
                    );
                }
                self.append_parts(&mut document, diagram, "rect", optional);
            }
            DiagramKind::Composition => {
                self.append_parts(&mut document, diagram, "path", optional);
                document.append(
                    diagram,
                    ElementSpec::new("button").class(selector::PLAY_COMPOSITION),
                );
            }
            DiagramKind::Functor | DiagramKind::Monad | DiagramKind::Adjunction => {
                self.append_parts(&mut document, diagram, "div", optional);
            }
        }

        Ok((document, diagram))
    }

    fn append_parts(
        &self,
        document: &mut MemoryDocument,
        diagram: ElementId,
        tag: &str,
        parts: &[&str],
    ) {
        for part in parts.iter().filter(|part| !self.missing.iter().any(|m| m == *part)) {
            document.append(diagram, ElementSpec::new(tag).class(part));
        }
    }
}

/// Class names of the parts a diagram kind can do without.
pub fn optional_parts(kind: DiagramKind) -> &'static [&'static str] {
    match kind {
        DiagramKind::Commutative => &[],
        DiagramKind::Functor => &[
            selector::SOURCE_CATEGORY,
            selector::FUNCTOR_ARROW,
            selector::TARGET_CATEGORY,
        ],
        DiagramKind::NaturalTransformation => &[selector::NATURALITY_SQUARE],
        DiagramKind::Monad => &[selector::MONAD_UNIT, selector::MONAD_MULT],
        DiagramKind::Adjunction => &[
            selector::LEFT_ADJOINT,
            selector::RIGHT_ADJOINT,
            selector::ADJUNCTION_BIJECTION,
        ],
        DiagramKind::Composition => &[
            selector::ARROW_F,
            selector::ARROW_G,
            selector::ARROW_COMPOSED,
        ],
    }
}

/// One scheduled step, with its targets described by role.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntry {
    pub start: f64,
    pub end: f64,
    pub targets: Vec<String>,
}

/// A flattened timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    name: String,
    /// `None` for timelines started by a click instead of a gate.
    binding: Option<GateBinding>,
    repeat: bool,
    entries: Vec<PlanEntry>,
}

impl Plan {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn binding(&self) -> Option<&GateBinding> {
        self.binding.as_ref()
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    fn new(
        document: &MemoryDocument,
        timeline: &Timeline,
        binding: Option<GateBinding>,
    ) -> Self {
        let entries = timeline
            .schedule()
            .into_iter()
            .map(|scheduled| PlanEntry {
                start: scheduled.start(),
                end: scheduled.end(),
                targets: timeline.steps()[scheduled.index()]
                    .targets()
                    .iter()
                    .map(|target| role(document, *target))
                    .collect(),
            })
            .collect();
        Self {
            name: timeline.name().to_string(),
            binding,
            repeat: timeline.repeat().is_infinite(),
            entries,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = String::new();
        match &self.binding {
            Some(binding) => {
                write!(header, "{}", binding.threshold())?;
                if binding.reversible() {
                    header.push_str(", reversible");
                }
            }
            None => header.push_str("on click"),
        }
        if self.repeat {
            header.push_str(", repeats");
        }
        writeln!(f, "# {} ({header})", self.name)?;

        for entry in &self.entries {
            writeln!(
                f,
                "{:.3} {:.3} {} {}",
                entry.start,
                entry.end,
                entry.targets.join(","),
                self.name
            )?;
        }
        Ok(())
    }
}

/// Describes an element by its first class, or its tag when unclassed.
fn role(document: &MemoryDocument, element: ElementId) -> String {
    document
        .classes(element)
        .first()
        .map(String::as_str)
        .or_else(|| document.tag(element))
        .map(|name| format!("{name}{element}"))
        .unwrap_or_else(|| element.to_string())
}

/// Composes the timeline for the diagram of `kind` in `document`.
///
/// Returns `None` when the diagram has nothing to animate.
pub fn compose_plan(document: &MemoryDocument, kind: DiagramKind) -> Option<Plan> {
    let selector = ElementSelector::new(document);
    let gated = match kind {
        DiagramKind::Commutative => selector
            .commutative_diagrams()
            .first()
            .and_then(compose::commutative),
        DiagramKind::Functor => selector
            .functor_diagrams()
            .first()
            .and_then(compose::functor),
        DiagramKind::NaturalTransformation => selector
            .natural_transformations()
            .first()
            .and_then(compose::natural_transformation),
        DiagramKind::Monad => selector.monad_diagrams().first().and_then(compose::monad),
        DiagramKind::Adjunction => selector
            .adjunction_diagrams()
            .first()
            .and_then(compose::adjunction),
        DiagramKind::Composition => {
            let parts = selector.composition_diagrams().into_iter().next()?;
            let timeline = compose::composition_run(&parts);
            return (!timeline.is_empty()).then(|| Plan::new(document, &timeline, None));
        }
    };

    let gated = gated?;
    debug!(kind = kind.name(), steps = gated.timeline().steps().len(); "Composed plan");
    Some(Plan::new(document, gated.timeline(), Some(*gated.binding())))
}

/// Builds `sample` and renders its plan.
///
/// # Errors
///
/// Returns error if the sample names an unknown part.
pub fn render_plan(sample: &Sample) -> Result<String, CliError> {
    let (document, _) = sample.build()?;
    Ok(match compose_plan(&document, sample.kind) {
        Some(plan) => plan.to_string(),
        None => format!("# {}: nothing to animate\n", sample.kind),
    })
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_commutative_plan() {
        let sample = Sample::new(DiagramKind::Commutative);
        let (document, _) = sample.build().unwrap();

        let plan = compose_plan(&document, DiagramKind::Commutative).unwrap();

        assert_eq!(plan.name(), "commutative");
        assert_eq!(plan.entries().len(), 4);
        assert_approx_eq!(f64, plan.entries()[1].start, 0.2, epsilon = 1e-9);
        assert_eq!(plan.entries()[3].targets.len(), 2);
        assert!(plan.binding().unwrap().reversible());
    }

    #[test]
    fn test_functor_without_arrow() {
        let sample = Sample::new(DiagramKind::Functor)
            .with_missing(vec![selector::FUNCTOR_ARROW.to_string()]);
        let (document, _) = sample.build().unwrap();

        let plan = compose_plan(&document, DiagramKind::Functor).unwrap();

        assert_eq!(plan.entries().len(), 2);
        assert!(plan.entries()[1].targets[0].starts_with("target-category#"));
        assert_approx_eq!(f64, plan.entries()[1].start, 0.4, epsilon = 1e-9);
    }

    #[test]
    fn test_composition_plan_is_click_driven() {
        let (document, _) = Sample::new(DiagramKind::Composition).build().unwrap();

        let plan = compose_plan(&document, DiagramKind::Composition).unwrap();

        assert!(plan.binding().is_none());
        assert_eq!(plan.entries().len(), 4);
        assert_eq!(plan.entries()[3].targets.len(), 3);
        assert!(plan.to_string().starts_with("# composition (on click)\n"));
    }

    #[test]
    fn test_empty_sample_has_nothing_to_animate() {
        let sample = Sample::new(DiagramKind::Monad).with_missing(vec![
            selector::MONAD_UNIT.to_string(),
            selector::MONAD_MULT.to_string(),
        ]);

        assert_eq!(render_plan(&sample).unwrap(), "# monad: nothing to animate\n");
    }

    #[test]
    fn test_unknown_part_is_rejected() {
        let sample = Sample::new(DiagramKind::Commutative)
            .with_missing(vec![selector::FUNCTOR_ARROW.to_string()]);

        let err = sample.build().unwrap_err();

        assert!(matches!(err, CliError::UnknownPart { part, .. } if part == "functor-arrow"));
    }

    #[test]
    fn test_rendered_lines() {
        let sample = Sample::new(DiagramKind::Monad);

        let rendered = render_plan(&sample).unwrap();

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "# monad (top 70%, repeats)");
        assert_eq!(lines[1], "0.000 0.600 monad-unit#2 monad");
        assert_eq!(lines[2], "0.300 0.900 monad-mult#3 monad");
    }
}
