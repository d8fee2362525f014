use super::photo::Photo;

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Axis-aligned rectangle in surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when `other` lies entirely inside `self`, allowing for float
    /// rounding at the edges.
    pub fn contains(&self, other: &Rect) -> bool {
        const EPSILON: f32 = 1e-3;
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// How a line of text is drawn. `y` passed to [`DrawingSurface::fill_text`]
/// is the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn centered(size: f32, bold: bool, color: Color) -> Self {
        Self {
            size,
            bold,
            color,
            align: TextAlign::Center,
        }
    }
}

/// A 2D target the card layout is drawn onto.
pub trait DrawingSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline `rect` with a stroke centered on its edges.
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);

    /// Draw `photo` scaled to exactly `dest`.
    fn draw_image(&mut self, photo: &Photo, dest: Rect);
}
