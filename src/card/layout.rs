use chrono::{Datelike, Local, NaiveDate};

use super::{
    CardDefaults, CardRequest,
    pass_id::{PassId, PassIdGenerator, RandomPassIdGenerator},
    photo::fit_within,
    surface::{Color, DrawingSurface, Rect, TextStyle},
};

pub const CARD_WIDTH: u32 = 400;
pub const CARD_HEIGHT: u32 = 600;

const BACKGROUND: Color = Color::rgb(0xf8, 0xf9, 0xfa);
const INK: Color = Color::rgb(0x2c, 0x3e, 0x50);
const CRIMSON: Color = Color::rgb(0xdc, 0x14, 0x3c);
const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
const PHOTO_BACKDROP: Color = Color::rgb(0xe9, 0xec, 0xef);
const LEGAL_INK: Color = Color::rgb(0x1a, 0x25, 0x2f);

const HEADER_HEIGHT: f32 = 80.0;
const HEADER_BASELINE: f32 = 50.0;
const PHOTO_TOP: f32 = 95.0;
const PHOTO_MARGIN: f32 = 20.0;
const PHOTO_HEIGHT: f32 = 200.0;
const NAME_Y: f32 = 335.0;
const ORG_BLOCK_Y: f32 = 368.0;
const LEGAL_Y: f32 = 524.0;
const LEGAL_STEP: f32 = 14.0;
const NOTES_Y: f32 = 572.0;
const NOTES_STEP: f32 = 13.0;

/// Photo slot for a surface of the given width.
pub fn photo_region(surface_width: u32) -> Rect {
    Rect::new(
        PHOTO_MARGIN,
        PHOTO_TOP,
        surface_width as f32 - 2.0 * PHOTO_MARGIN,
        PHOTO_HEIGHT,
    )
}

/// Year printed on the expiry line: always two calendar years ahead.
pub fn expiration_year(today: NaiveDate) -> i32 {
    today.year() + 2
}

pub fn expiration_text(today: NaiveDate) -> String {
    format!("DEC 31, {}", expiration_year(today))
}

pub struct CardRenderer {
    defaults: CardDefaults,
    ids: Box<dyn PassIdGenerator>,
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self::new(CardDefaults::default(), Box::new(RandomPassIdGenerator))
    }
}

impl std::fmt::Debug for CardRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardRenderer")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl CardRenderer {
    pub fn new(defaults: CardDefaults, ids: Box<dyn PassIdGenerator>) -> Self {
        Self { defaults, ids }
    }

    pub fn defaults(&self) -> &CardDefaults {
        &self.defaults
    }

    /// Draw the pass for today's date. Returns `None` without drawing
    /// anything when there is no surface.
    pub fn render(
        &self,
        surface: Option<&mut dyn DrawingSurface>,
        request: &CardRequest,
    ) -> Option<PassId> {
        self.render_on(surface, request, Local::now().date_naive())
    }

    pub fn render_on(
        &self,
        surface: Option<&mut dyn DrawingSurface>,
        request: &CardRequest,
        today: NaiveDate,
    ) -> Option<PassId> {
        let surface = surface?;
        let d = &self.defaults;
        let name = request.display_name(d);
        let title = request.display_title(d);

        let width = surface.width() as f32;
        let height = surface.height() as f32;
        let center = width / 2.0;

        surface.clear();
        surface.fill_rect(Rect::new(0.0, 0.0, width, height), BACKGROUND);
        surface.stroke_rect(Rect::new(5.0, 5.0, width - 10.0, height - 10.0), INK, 3.0);

        surface.fill_rect(Rect::new(0.0, 0.0, width, HEADER_HEIGHT), CRIMSON);
        surface.fill_text(
            &d.header,
            center,
            HEADER_BASELINE,
            TextStyle::centered(24.0, true, WHITE),
        );

        let region = photo_region(surface.width());
        surface.fill_rect(region, PHOTO_BACKDROP);
        let placed = request.photo.as_ref().and_then(|photo| {
            fit_within(photo.width(), photo.height(), region).map(|dest| (photo, dest))
        });
        match placed {
            Some((photo, dest)) => surface.draw_image(photo, dest),
            None => surface.fill_text(
                &d.photo_placeholder,
                center,
                region.y + region.height / 2.0 + 7.0,
                TextStyle::centered(18.0, false, INK),
            ),
        }

        surface.fill_text(name, center, NAME_Y, TextStyle::centered(30.0, true, INK));

        let id = self.ids.generate();
        let org = ORG_BLOCK_Y;
        surface.fill_text(&d.brand, center, org, TextStyle::centered(20.0, true, INK));
        surface.fill_text(title, center, org + 24.0, TextStyle::centered(18.0, true, INK));
        surface.fill_text(&d.media, center, org + 52.0, TextStyle::centered(16.0, true, INK));
        surface.fill_text(
            &format!("ID: {id}"),
            center,
            org + 74.0,
            TextStyle::centered(14.0, false, INK),
        );
        surface.fill_text("ISSUED BY", center, org + 94.0, TextStyle::centered(11.0, true, INK));
        surface.fill_text(&d.brand, center, org + 108.0, TextStyle::centered(11.0, true, INK));
        surface.fill_text(
            &format!("VALID THROUGH {}", expiration_text(today)),
            center,
            org + 132.0,
            TextStyle::centered(14.0, true, CRIMSON),
        );

        for (i, line) in d.legal_notice.iter().enumerate() {
            let y = LEGAL_Y + i as f32 * LEGAL_STEP;
            surface.fill_text(line, center, y, TextStyle::centered(10.0, true, LEGAL_INK));
        }
        for (i, line) in d.conduct_notes.iter().enumerate() {
            let y = NOTES_Y + i as f32 * NOTES_STEP;
            surface.fill_text(line, center, y, TextStyle::centered(9.0, true, INK));
        }

        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn expiration_ignores_month_and_day() {
        assert_eq!(expiration_text(date(2026, 1, 1)), "DEC 31, 2028");
        assert_eq!(expiration_text(date(2026, 12, 31)), "DEC 31, 2028");
        assert_eq!(expiration_text(date(2024, 2, 29)), "DEC 31, 2026");
    }

    #[test]
    fn photo_region_leaves_side_margins() {
        let region = photo_region(CARD_WIDTH);
        assert_eq!(region, Rect::new(20.0, 95.0, 360.0, 200.0));
    }
}
