//! Configuration types for Catena orchestration.
//!
//! All types implement [`serde::Deserialize`] and every section falls back to
//! its defaults, so an empty document is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining interaction and style settings.
//! - [`InteractionConfig`] - Toggles and tuning for hover and in-page scrolling.
//! - [`StyleConfig`] - Arrow and node style overrides applied by the diagram builders.
//!
//! # Example
//!
//! ```
//! # use catena::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.interaction().hover());
//! assert_eq!(config.interaction().scroll_offset(), 80.0);
//! ```

use serde::Deserialize;

use catena_core::draw::{ArrowStyle, ArrowStyleOverrides, NodeStyle, NodeStyleOverrides};

use crate::CatenaError;

/// Top-level configuration combining interaction and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Interaction configuration section.
    #[serde(default)]
    interaction: InteractionConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(interaction: InteractionConfig, style: StyleConfig) -> Self {
        Self { interaction, style }
    }

    /// Returns the interaction configuration.
    pub fn interaction(&self) -> &InteractionConfig {
        &self.interaction
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks values that would otherwise surface as odd runtime behavior.
    ///
    /// # Errors
    ///
    /// Returns [`CatenaError::Config`] if the scroll offset or duration is
    /// negative or not finite, or if a style override names a color that
    /// does not parse.
    pub fn validate(&self) -> Result<(), CatenaError> {
        self.style.arrow.validate()?;
        self.style.node.validate()?;

        let interaction = &self.interaction;
        if !interaction.scroll_offset.is_finite() {
            return Err(CatenaError::Config(format!(
                "interaction.scroll_offset must be finite, got {}",
                interaction.scroll_offset
            )));
        }
        if !interaction.scroll_duration.is_finite() || interaction.scroll_duration < 0.0 {
            return Err(CatenaError::Config(format!(
                "interaction.scroll_duration must be a non-negative number, got {}",
                interaction.scroll_duration
            )));
        }
        Ok(())
    }
}

/// Hover and in-page link behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InteractionConfig {
    hover: bool,
    smooth_scroll: bool,
    scroll_offset: f64,
    scroll_duration: f64,
}

impl InteractionConfig {
    /// Returns whether node and arrow hover feedback is wired.
    pub fn hover(&self) -> bool {
        self.hover
    }

    /// Returns whether in-page links scroll smoothly.
    pub fn smooth_scroll(&self) -> bool {
        self.smooth_scroll
    }

    /// Distance kept between the viewport top and a scroll target.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Duration of a smooth scroll in seconds.
    pub fn scroll_duration(&self) -> f64 {
        self.scroll_duration
    }

    pub fn with_hover(mut self, hover: bool) -> Self {
        self.hover = hover;
        self
    }

    pub fn with_smooth_scroll(mut self, smooth_scroll: bool) -> Self {
        self.smooth_scroll = smooth_scroll;
        self
    }

    pub fn with_scroll_offset(mut self, offset: f64) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn with_scroll_duration(mut self, duration: f64) -> Self {
        self.scroll_duration = duration;
        self
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hover: true,
            smooth_scroll: true,
            scroll_offset: 80.0,
            scroll_duration: 0.8,
        }
    }
}

/// Style overrides for the diagram builders.
///
/// Overrides are merged field by field onto the built-in defaults, see
/// [`ArrowStyle::merged`] and [`NodeStyle::merged`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    arrow: ArrowStyleOverrides,
    node: NodeStyleOverrides,
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`] from override sets.
    pub fn new(arrow: ArrowStyleOverrides, node: NodeStyleOverrides) -> Self {
        Self { arrow, node }
    }

    /// Returns the configured arrow overrides.
    pub fn arrow_overrides(&self) -> &ArrowStyleOverrides {
        &self.arrow
    }

    /// Returns the configured node overrides.
    pub fn node_overrides(&self) -> &NodeStyleOverrides {
        &self.node
    }

    /// Returns the arrow style with configured overrides applied.
    pub fn arrow(&self) -> ArrowStyle {
        ArrowStyle::merged(&self.arrow)
    }

    /// Returns the node style with configured overrides applied.
    pub fn node(&self) -> NodeStyle {
        NodeStyle::merged(&self.node)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use catena_core::color::Color;

    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert!(config.interaction().hover());
        assert!(config.interaction().smooth_scroll());
        assert_approx_eq!(f64, config.interaction().scroll_offset(), 80.0);
        assert_approx_eq!(f64, config.interaction().scroll_duration(), 0.8);
        assert_eq!(config.style().arrow(), ArrowStyle::default());
        assert_eq!(config.style().node(), NodeStyle::default());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r##"
            [interaction]
            hover = false

            [style.arrow]
            curved = true
            stroke_color = "#ef4444"

            [style.node]
            radius = 30.0
            "##,
        )
        .unwrap();

        assert!(!config.interaction().hover());
        assert!(config.interaction().smooth_scroll());

        let arrow = config.style().arrow();
        assert!(arrow.curved());
        assert_approx_eq!(f32, arrow.curvature(), 0.2);
        assert_eq!(arrow.stroke().color(), Color::new("#ef4444").unwrap());
        assert_approx_eq!(f32, arrow.stroke().width(), 2.0);

        let node = config.style().node();
        assert_approx_eq!(f32, node.radius(), 30.0);
        assert_approx_eq!(f32, node.font_size(), 16.0);
    }

    #[test]
    fn test_unknown_interaction_key_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
            [interaction]
            hovr = true
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_color_override_falls_back_and_fails_validation() {
        let config: AppConfig = toml::from_str(
            r#"
            [style.arrow]
            stroke_color = "not-a-color"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.style().arrow().stroke().color(),
            ArrowStyle::default().stroke().color()
        );
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CatenaError::Config(message) if message.contains("not-a-color")));
    }

    #[test]
    fn test_validate() {
        assert!(AppConfig::default().validate().is_ok());

        let negative = AppConfig::new(
            InteractionConfig::default().with_scroll_duration(-1.0),
            StyleConfig::default(),
        );
        assert!(matches!(negative.validate(), Err(CatenaError::Config(_))));

        let infinite = AppConfig::new(
            InteractionConfig::default().with_scroll_offset(f64::INFINITY),
            StyleConfig::default(),
        );
        assert!(matches!(infinite.validate(), Err(CatenaError::Config(_))));
    }
}
