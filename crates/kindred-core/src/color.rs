//! Color handling for rendered family trees.
//!
//! [`Color`] wraps `DynamicColor` from the color crate so style settings can be
//! written as ordinary CSS color strings and validated once, up front.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A validated CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string such as "#ff0000", "rgb(255, 0, 0)" or "red".
    ///
    /// # Examples
    ///
    /// ```
    /// use kindred_core::color::Color;
    ///
    /// assert!(Color::new("#f5efe6").is_ok());
    /// assert!(Color::new("sepia-ish").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns the alpha (transparency) component, between 0.0 and 1.0.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
        assert!((color.alpha() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_color_error_mentions_input() {
        let err = Color::new("nope").unwrap_err();
        assert!(err.contains("nope"));
    }
}
