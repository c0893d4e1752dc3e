//! Layout modes, frame identifiers and grid geometry.

use crate::error::ValidationError;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How many frames are visible and how they are arranged.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LayoutMode {
    Fullscreen,
    #[default]
    Split,
    Quad,
}

/// Rows and columns of the frame grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridShape {
    pub rows: u16,
    pub cols: u16,
}

impl LayoutMode {
    /// Round-robin successor used by the layout toggle.
    pub fn next(&self) -> Self {
        match self {
            LayoutMode::Fullscreen => LayoutMode::Split,
            LayoutMode::Split => LayoutMode::Quad,
            LayoutMode::Quad => LayoutMode::Fullscreen,
        }
    }

    pub fn grid_shape(&self) -> GridShape {
        match self {
            LayoutMode::Fullscreen => GridShape { rows: 1, cols: 1 },
            LayoutMode::Split => GridShape { rows: 1, cols: 2 },
            LayoutMode::Quad => GridShape { rows: 2, cols: 2 },
        }
    }

    /// Frames rendered under this layout, in grid order.
    pub fn visible_frames(&self) -> &'static [FrameId] {
        match self {
            LayoutMode::Fullscreen => &[FrameId::Frame1],
            LayoutMode::Split => &[FrameId::Frame1, FrameId::Frame2],
            LayoutMode::Quad => &FrameId::ALL,
        }
    }

    pub fn is_visible(&self, frame: FrameId) -> bool {
        self.visible_frames().contains(&frame)
    }

    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        LayoutMode::from_str(name.trim())
            .map_err(|_| ValidationError::UnknownLayout(name.trim().to_string()))
    }

    /// Short glyph shown on the console's layout toggle.
    pub fn indicator(&self) -> &'static str {
        match self {
            LayoutMode::Fullscreen => "[■]",
            LayoutMode::Split => "[▌▐]",
            LayoutMode::Quad => "[▚▞]",
        }
    }
}

/// Stable identifier of a frame slot.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FrameId {
    Frame1,
    Frame2,
    Frame3,
    Frame4,
}

impl FrameId {
    pub const ALL: [FrameId; 4] = [
        FrameId::Frame1,
        FrameId::Frame2,
        FrameId::Frame3,
        FrameId::Frame4,
    ];

    /// One-based slot number.
    pub fn number(&self) -> usize {
        match self {
            FrameId::Frame1 => 1,
            FrameId::Frame2 => 2,
            FrameId::Frame3 => 3,
            FrameId::Frame4 => 4,
        }
    }

    /// Accepts `frame2`, `Frame2` or `2`.
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        FrameId::from_str(name)
    }
}

impl FromStr for FrameId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let digits = trimmed.strip_prefix("frame").unwrap_or(&trimmed);
        match digits {
            "1" => Ok(FrameId::Frame1),
            "2" => Ok(FrameId::Frame2),
            "3" => Ok(FrameId::Frame3),
            "4" => Ok(FrameId::Frame4),
            _ => Err(ValidationError::UnknownFrame(s.trim().to_string())),
        }
    }
}

impl Display for FrameId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame{}", self.number())
    }
}

/// Split `area` into the rectangles of the frames visible under `layout`.
pub fn frame_areas(area: Rect, layout: LayoutMode) -> Vec<(FrameId, Rect)> {
    let shape = layout.grid_shape();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, shape.rows as u32); shape.rows as usize])
        .split(area);

    let cells = rows.iter().flat_map(|row| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, shape.cols as u32); shape.cols as usize])
            .split(*row)
            .to_vec()
    });

    layout
        .visible_frames()
        .iter()
        .copied()
        .zip(cells)
        .collect()
}

/// Width of the `[x]` remove control drawn in a frame's top border.
pub const REMOVE_CONTROL_WIDTH: u16 = 3;

/// Cells covered by the remove control of a frame drawn in `rect`.
pub fn remove_control_area(rect: Rect) -> Rect {
    let x = rect
        .right()
        .saturating_sub(REMOVE_CONTROL_WIDTH + 1)
        .max(rect.x);
    Rect::new(x, rect.y, REMOVE_CONTROL_WIDTH.min(rect.width), 1.min(rect.height))
}
