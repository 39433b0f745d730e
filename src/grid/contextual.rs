//! Corner flags drawn on individual cells.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridbookError;
use crate::theme::StyleBag;

const FLAG_BORDER: &str = "0.8em solid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Corner {
    type Err = GridbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" => Ok(Self::TopLeft),
            "top-right" => Ok(Self::TopRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom-right" => Ok(Self::BottomRight),
            other => Err(GridbookError::invalid(format!("unknown corner \"{other}\""))),
        }
    }
}

/// A colored triangle in one corner of a 1-based cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contextual {
    pub row: usize,
    pub column: usize,
    pub color: String,
    pub corner: Corner,
}

impl Contextual {
    /// Zero-size absolutely positioned box whose borders form the triangle.
    pub fn style(&self) -> StyleBag {
        let solid = format!("{FLAG_BORDER} {}", self.color);
        let clear = format!("{FLAG_BORDER} transparent");
        let base = StyleBag::new()
            .with("position", "absolute")
            .with("width", 0)
            .with("height", 0);
        match self.corner {
            Corner::TopLeft => base
                .with("border-right", clear)
                .with("border-top", solid)
                .with("left", 0)
                .with("top", 0),
            Corner::TopRight => base
                .with("border-left", clear)
                .with("border-top", solid)
                .with("right", 0)
                .with("top", 0),
            Corner::BottomLeft => base
                .with("border-top", clear)
                .with("border-left", solid)
                .with("left", 0)
                .with("bottom", 0),
            Corner::BottomRight => base
                .with("border-top", clear)
                .with("border-right", solid)
                .with("right", 0)
                .with("bottom", 0),
        }
    }
}
