//! Pattern module - a single matchable token on the table

use std::fmt;

use crate::types::{Point, Rect, Size};

/// Stable handle of a pattern: its index in the deck.
///
/// Many patterns share a `type_id`; membership and undo always go through this handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternId(pub usize);

impl PatternId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A token dealt onto the table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pattern {
    pub type_id: u32,
    /// Index of the layer this pattern was dealt into (0 = bottom)
    pub layer: usize,
    /// Centre of the pattern in play-area coordinates
    pub position: Point,
    pub size: Size,
    /// Set once the pattern has been taken into the holding area
    pub cleared: bool,
}

impl Pattern {
    pub fn new(type_id: u32, size: Size) -> Self {
        Self {
            type_id,
            layer: 0,
            position: Point::default(),
            size,
            cleared: false,
        }
    }

    /// Bounding rectangle centred on `position`
    pub fn rect(&self) -> Rect {
        Rect::centered(self.position, self.size)
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.rect().contains(point)
    }

    pub fn overlaps(&self, other: &Pattern) -> bool {
        self.rect().overlaps(&other.rect())
    }
}
