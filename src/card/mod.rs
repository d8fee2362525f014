pub mod error;
pub mod layout;
pub mod pass_id;
pub mod photo;
pub mod raster;
pub mod recording;
pub mod surface;

pub use error::RenderError;
pub use layout::{CARD_HEIGHT, CARD_WIDTH, CardRenderer};
pub use pass_id::{PassId, PassIdGenerator, RandomPassIdGenerator};
pub use photo::{ImageDecoder, Photo, PhotoDecoder};
pub use raster::RasterSurface;
pub use recording::{DrawCall, RecordingSurface};
pub use surface::{Color, DrawingSurface, Rect, TextAlign, TextStyle};

/// Fixed wording printed on every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDefaults {
    pub name: String,
    pub title: String,
    pub brand: String,
    pub media: String,
    pub header: String,
    pub photo_placeholder: String,
    pub legal_notice: Vec<String>,
    pub conduct_notes: Vec<String>,
}

impl Default for CardDefaults {
    fn default() -> Self {
        Self {
            name: "YOUR NAME HERE".into(),
            title: "Investigative Journalist".into(),
            brand: "CONSTITUTIONAL PRESS ASSOCIATION".into(),
            media: "FULL COURT PRESS MEDIA".into(),
            header: "PRESS PASS".into(),
            photo_placeholder: "PHOTO AREA".into(),
            legal_notice: vec![
                "THIS JOURNALIST IS RECOGNIZED UNDER THE PROTECTIONS".into(),
                "OF THE FIRST AMENDMENT OF THE U.S. CONSTITUTION.".into(),
                "ANY INTERFERENCE WILL BE A VIOLATION OF FEDERAL LAW.".into(),
            ],
            conduct_notes: vec![
                "Do not hinder, exclude, or block the view of this journalist".into(),
                "in the exercise of court-recognized First Amendment rights.".into(),
            ],
        }
    }
}

/// Input for one render.
#[derive(Debug, Clone, Default)]
pub struct CardRequest {
    pub name: String,
    pub title: String,
    pub photo: Option<Photo>,
}

impl CardRequest {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            photo: None,
        }
    }

    pub fn with_photo(mut self, photo: Photo) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Trimmed name, or the placeholder when blank.
    pub fn display_name<'a>(&'a self, defaults: &'a CardDefaults) -> &'a str {
        non_blank(&self.name).unwrap_or(defaults.name.as_str())
    }

    /// Trimmed title, or the placeholder when blank.
    pub fn display_title<'a>(&'a self, defaults: &'a CardDefaults) -> &'a str {
        non_blank(&self.title).unwrap_or(defaults.title.as_str())
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
