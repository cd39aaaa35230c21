//! Color handling for Catena diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, so style fields accept any CSS color string.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

use crate::Error;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#333", "rgb(99, 102, 241)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use catena_core::color::Color;
    ///
    /// let indigo = Color::new("#6366f1").unwrap();
    /// let white = Color::new("white").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, Error> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| Error::InvalidColor {
                input: color_str.to_string(),
                reason: err.to_string(),
            })
    }

    /// Parses `color_str`, falling back to `default` when it is not a valid color.
    pub fn parse_or(color_str: &str, default: Color) -> Self {
        Self::new(color_str).unwrap_or(default)
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}
