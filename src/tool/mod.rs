pub(crate) mod compositor;

use std::{fmt, str::FromStr};

use crate::foundation::error::PaintError;

/// Drawing tool selected on the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Interpolated stamping, merged with source-over.
    #[default]
    Paint,
    /// Timer-driven jittered stamping straight onto the surface.
    Spray,
    /// Straight line from the stroke anchor to the pointer.
    Pen,
    /// Seed fill at the pointer-down position.
    Fill,
    /// Interpolated stamping, merged with destination-out.
    Eraser,
}

impl Tool {
    /// Lowercase name accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paint => "paint",
            Self::Spray => "spray",
            Self::Pen => "pen",
            Self::Fill => "fill",
            Self::Eraser => "eraser",
        }
    }
}

impl FromStr for Tool {
    type Err = PaintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paint" => Ok(Self::Paint),
            "spray" => Ok(Self::Spray),
            "pen" => Ok(Self::Pen),
            "fill" => Ok(Self::Fill),
            "eraser" => Ok(Self::Eraser),
            other => Err(PaintError::unknown_tool(other)),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
