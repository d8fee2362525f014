use super::{
    layout::{CARD_HEIGHT, CARD_WIDTH},
    photo::Photo,
    surface::{Color, DrawingSurface, Rect, TextStyle},
};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
    Image {
        source_width: u32,
        source_height: u32,
        dest: Rect,
    },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    calls: Vec<DrawCall>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(CARD_WIDTH, CARD_HEIGHT)
    }
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Every string drawn, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().contains(&needle)
    }

    pub fn images(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Image { .. }))
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        self.calls.push(DrawCall::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            style,
        });
    }

    fn draw_image(&mut self, photo: &Photo, dest: Rect) {
        self.calls.push(DrawCall::Image {
            source_width: photo.width(),
            source_height: photo.height(),
            dest,
        });
    }
}
