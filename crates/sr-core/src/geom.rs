/// Axis-aligned pixel rectangle with an absolute origin.
///
/// The origin only matters for destination views, where `y` selects the
/// filter-table rows and `x` selects the source rows of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn max_x(&self) -> usize {
        self.x + self.width
    }

    pub const fn max_y(&self) -> usize {
        self.y + self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
