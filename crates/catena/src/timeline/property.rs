//! Animatable properties and their target values.

use std::fmt;

use indexmap::IndexMap;

use catena_core::color::Color;

/// A presentation property an animation engine can tween.
///
/// Names render in the camel-case vocabulary tweening engines use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Opacity,
    Scale,
    ScaleX,
    X,
    Y,
    Rotation,
    StrokeDasharray,
    StrokeDashoffset,
    Stroke,
    StrokeWidth,
    Fill,
    BoxShadow,
    TransformOrigin,
}

impl Property {
    pub fn name(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::Scale => "scale",
            Self::ScaleX => "scaleX",
            Self::X => "x",
            Self::Y => "y",
            Self::Rotation => "rotation",
            Self::StrokeDasharray => "strokeDasharray",
            Self::StrokeDashoffset => "strokeDashoffset",
            Self::Stroke => "stroke",
            Self::StrokeWidth => "strokeWidth",
            Self::Fill => "fill",
            Self::BoxShadow => "boxShadow",
            Self::TransformOrigin => "transformOrigin",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Target value of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An absolute number.
    Number(f64),
    /// An offset from the current value, `+=n` or `-=n`.
    Relative(f64),
    Color(Color),
    /// A free-form value such as a shadow or transform origin.
    Text(String),
    /// One value per target, in target order.
    PerTarget(Vec<Value>),
}

impl Value {
    /// The value applied to the target at `index`.
    ///
    /// Uniform values apply to every target. Per-target values return
    /// `None` past the end of their list.
    pub fn for_target(&self, index: usize) -> Option<&Value> {
        match self {
            Self::PerTarget(values) => values.get(index),
            uniform => Some(uniform),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Color> for Value {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Relative(delta) if *delta < 0.0 => write!(f, "-={}", -delta),
            Self::Relative(delta) => write!(f, "+={delta}"),
            Self::Color(color) => write!(f, "{color}"),
            Self::Text(text) => write!(f, "{text}"),
            Self::PerTarget(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// An ordered property map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(IndexMap<Property, Value>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `property`, replacing any earlier value.
    pub fn with(mut self, property: Property, value: impl Into<Value>) -> Self {
        self.0.insert(property, value.into());
        self
    }

    pub fn get(&self, property: Property) -> Option<&Value> {
        self.0.get(&property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, &Value)> {
        self.0.iter().map(|(property, value)| (*property, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (property, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {property}: {value}")?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_value_display() {
        assert_eq!(Value::Relative(1.0).to_string(), "+=1");
        assert_eq!(Value::Relative(-1.0).to_string(), "-=1");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
    }

    #[test]
    fn test_per_target_values() {
        let value = Value::PerTarget(vec![Value::Number(1.0), Value::Number(2.0)]);

        assert_eq!(value.for_target(0), Some(&Value::Number(1.0)));
        assert_eq!(value.for_target(1), Some(&Value::Number(2.0)));
        assert_eq!(value.for_target(2), None);

        let uniform = Value::Number(3.0);
        assert_eq!(uniform.for_target(7), Some(&uniform));
    }

    #[test]
    fn test_properties_keep_insertion_order() {
        let properties = Properties::new()
            .with(Property::Opacity, 0.0)
            .with(Property::Y, 10.0)
            .with(Property::Opacity, 0.5);

        assert_eq!(properties.len(), 2);
        assert_eq!(properties.get(Property::Opacity), Some(&Value::Number(0.5)));
        assert_eq!(properties.to_string(), "{ opacity: 0.5, y: 10 }");
    }

    #[test]
    fn test_property_names() {
        assert_eq!(Property::StrokeDashoffset.to_string(), "strokeDashoffset");
        assert_eq!(Property::ScaleX.to_string(), "scaleX");
        assert_eq!(Property::BoxShadow.to_string(), "boxShadow");
    }
}
