//! Cell shape class codes

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geometric class of a grid cell, stored on records as an integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Square,
    Hexagon,
    Diamond,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Square, Shape::Hexagon, Shape::Diamond];

    /// The integer code written to the `shape` field
    pub const fn code(self) -> i32 {
        match self {
            Shape::Square => 1,
            Shape::Hexagon => 2,
            Shape::Diamond => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Square => "square",
            Shape::Hexagon => "hexagon",
            Shape::Diamond => "diamond",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = GridError;

    /// Accepts `square`, `diamond`, anything starting with `hex`, or a
    /// known numeric code.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        if lower.starts_with("hex") {
            return Ok(Shape::Hexagon);
        }
        match lower.as_str() {
            "square" => Ok(Shape::Square),
            "diamond" => Ok(Shape::Diamond),
            other => other
                .parse::<i32>()
                .ok()
                .and_then(Shape::from_code)
                .ok_or_else(|| GridError::UnknownShape(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Shape::Square.code(), 1);
        assert_eq!(Shape::Hexagon.code(), 2);
        assert_eq!(Shape::Diamond.code(), 3);
        assert_eq!(Shape::from_code(2), Some(Shape::Hexagon));
        assert_eq!(Shape::from_code(9), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Square".parse::<Shape>().unwrap(), Shape::Square);
        assert_eq!("hex".parse::<Shape>().unwrap(), Shape::Hexagon);
        assert_eq!("HEXAGON".parse::<Shape>().unwrap(), Shape::Hexagon);
        assert_eq!("diamond".parse::<Shape>().unwrap(), Shape::Diamond);
        assert_eq!("3".parse::<Shape>().unwrap(), Shape::Diamond);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "triangle".parse::<Shape>(),
            Err(GridError::UnknownShape(_))
        ));
        assert!("0".parse::<Shape>().is_err());
    }
}
