//! Points, sizes and boxes in diagram space.
//!
//! Coordinates follow SVG: the origin is the top-left corner and `y` grows
//! downward, so deeper tree levels sit at larger `y`.

/// A position in diagram space, usually a node center.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// The box of `size` centered on this point.
    ///
    /// ```
    /// # use taxograph_core::geometry::{Point, Size};
    /// let node = Point::new(50.0, 20.0).to_bounds(Size::new(40.0, 10.0));
    /// assert_eq!(node.min_x(), 30.0);
    /// assert_eq!(node.max_y(), 25.0);
    /// ```
    pub fn to_bounds(self, size: Size) -> Bounds {
        let (half_w, half_h) = (size.width / 2.0, size.height / 2.0);
        Bounds {
            min_x: self.x - half_w,
            min_y: self.y - half_h,
            max_x: self.x + half_w,
            max_y: self.y + half_h,
        }
    }
}

/// Measured extent of a label or node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Axis-aligned box occupied by a node or by the whole diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    fn center_x(self) -> f32 {
        (self.min_x + self.max_x) / 2.0
    }

    pub fn center(self) -> Point {
        Point::new(self.center_x(), (self.min_y + self.max_y) / 2.0)
    }

    /// Where an incoming edge attaches.
    pub fn top_center(self) -> Point {
        Point::new(self.center_x(), self.min_y)
    }

    /// Where outgoing edges leave.
    pub fn bottom_center(self) -> Point {
        Point::new(self.center_x(), self.max_y)
    }

    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// True when the interiors overlap. Boxes sharing only an edge do not
    /// intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Smallest box containing both.
    ///
    /// ```
    /// # use taxograph_core::geometry::{Bounds, Point, Size};
    /// let root = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let child = Bounds::new_from_top_left(Point::new(10.0, 90.0), Size::new(120.0, 30.0));
    ///
    /// let tree = root.merge(&child);
    /// assert_eq!(tree.width(), 130.0);
    /// assert_eq!(tree.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Label padding, one value per side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}
