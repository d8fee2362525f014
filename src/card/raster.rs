use std::{io::Cursor, sync::LazyLock};

use ab_glyph::{Font, FontRef, GlyphId, PxScale, ScaleFont, point};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, Rgba, RgbaImage, imageops};

use super::{
    error::RenderError,
    layout::{CARD_HEIGHT, CARD_WIDTH},
    photo::Photo,
    surface::{Color, DrawingSurface, Rect, TextAlign, TextStyle},
};

static REGULAR: LazyLock<Option<FontRef<'static>>> = LazyLock::new(|| {
    FontRef::try_from_slice(include_bytes!("../../assets/fonts/DejaVuSans.ttf")).ok()
});
static BOLD: LazyLock<Option<FontRef<'static>>> = LazyLock::new(|| {
    FontRef::try_from_slice(include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf")).ok()
});

/// Lines wider than the surface minus this margin are condensed.
const TEXT_MARGIN: f32 = 10.0;

fn typeface(bold: bool) -> Option<&'static FontRef<'static>> {
    if bold { (*BOLD).as_ref() } else { (*REGULAR).as_ref() }
}

/// Scale for a CSS-style pixel size, which counts pixels per em.
fn em_scale(font: &FontRef<'_>, size: f32) -> PxScale {
    let units_per_em = font.units_per_em().unwrap_or(2048.0);
    PxScale::from(size * font.height_unscaled() / units_per_em)
}

fn advance_width(font: &FontRef<'_>, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut previous: Option<GlyphId> = None;
    let mut width = 0.0;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    width
}

pub struct RasterSurface {
    canvas: RgbaImage,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(CARD_WIDTH, CARD_HEIGHT)
    }
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        self.canvas
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(RenderError::Encode)?;
        Ok(bytes)
    }

    /// `data:` URL of the PNG, for opening the image directly.
    pub fn to_data_url(&self) -> Result<String, RenderError> {
        let png = self.encode_png()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }

    fn fill_area(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
        let (width, height) = (self.canvas.width() as f32, self.canvas.height() as f32);
        let left = x0.round().clamp(0.0, width) as u32;
        let right = x1.round().clamp(0.0, width) as u32;
        let top = y0.round().clamp(0.0, height) as u32;
        let bottom = y1.round().clamp(0.0, height) as u32;
        let pixel = Rgba(color.to_rgba());
        for y in top..bottom {
            for x in left..right {
                self.canvas.put_pixel(x, y, pixel);
            }
        }
    }

    fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.canvas.width() || y >= self.canvas.height() {
            return;
        }
        let alpha = coverage.clamp(0.0, 1.0);
        if alpha == 0.0 {
            return;
        }
        let src = color.to_rgba();
        let dst = self.canvas.get_pixel_mut(x, y);
        for channel in 0..3 {
            let mixed = src[channel] as f32 * alpha + dst[channel] as f32 * (1.0 - alpha);
            dst[channel] = mixed.round() as u8;
        }
        let base = dst[3] as f32 / 255.0;
        dst[3] = ((alpha + base * (1.0 - alpha)) * 255.0).round() as u8;
    }
}

impl DrawingSurface for RasterSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn clear(&mut self) {
        for pixel in self.canvas.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_area(rect.x, rect.y, rect.right(), rect.bottom(), color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        let half = line_width / 2.0;
        let (l, t, r, b) = (rect.x, rect.y, rect.right(), rect.bottom());
        self.fill_area(l - half, t - half, r + half, t + half, color);
        self.fill_area(l - half, b - half, r + half, b + half, color);
        self.fill_area(l - half, t - half, l + half, b + half, color);
        self.fill_area(r - half, t - half, r + half, b + half, color);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        let Some(font) = typeface(style.bold) else {
            tracing::warn!("embedded font failed to load, text skipped");
            return;
        };
        let em = em_scale(font, style.size);
        let natural = advance_width(font, em, text);
        if natural <= 0.0 {
            return;
        }
        let available = (self.canvas.width() as f32 - 2.0 * TEXT_MARGIN).max(1.0);
        let condense = (available / natural).min(1.0);
        let scale = PxScale {
            x: em.x * condense,
            y: em.y,
        };
        let line_width = natural * condense;
        let left = match style.align {
            TextAlign::Left => x,
            TextAlign::Center => x - line_width / 2.0,
            TextAlign::Right => x - line_width,
        };

        let scaled = font.as_scaled(scale);
        let mut caret = left;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, y));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (ox, oy) = (bounds.min.x as i64, bounds.min.y as i64);
                outlined.draw(|gx, gy, coverage| {
                    self.blend(ox + gx as i64, oy + gy as i64, style.color, coverage);
                });
            }
        }
    }

    fn draw_image(&mut self, photo: &Photo, dest: Rect) {
        let width = dest.width.round().max(1.0) as u32;
        let height = dest.height.round().max(1.0) as u32;
        let scaled = imageops::resize(photo.pixels(), width, height, imageops::FilterType::Triangle);
        imageops::overlay(
            &mut self.canvas,
            &scaled,
            dest.x.round() as i64,
            dest.y.round() as i64,
        );
    }
}
