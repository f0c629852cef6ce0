use serde::{Deserialize, Serialize};

/// Board coordinate; `x` is the column, `y` is the row, `y` grows upward.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardPos {
    pub x: i32,
    pub y: i32,
}

impl BoardPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Per-axis absolute distance to another position.
    pub fn abs_delta(&self, other: BoardPos) -> (i32, i32) {
        ((self.x - other.x).abs(), (self.y - other.y).abs())
    }
}

impl std::fmt::Display for BoardPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::fmt::Debug for BoardPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abs_delta_is_symmetric() {
        let a = BoardPos::new(1, 3);
        let b = BoardPos::new(3, 2);
        assert_eq!(a.abs_delta(b), (2, 1));
        assert_eq!(b.abs_delta(a), (2, 1));
    }

    #[test]
    fn test_offset() {
        assert_eq!(BoardPos::new(4, 4).offset(-1, 2), BoardPos::new(3, 6));
    }
}
