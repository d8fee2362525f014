use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Multipart fields accepted by the pass rendering routes.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct PassForm {
    pub name: Option<String>,
    pub title: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub photo: Option<Vec<u8>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PassQuery {
    /// `inline` to open the image instead of downloading it.
    pub view: Option<String>,
}

impl PassQuery {
    pub fn is_inline(&self) -> bool {
        self.view.as_deref() == Some("inline")
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PassPreview {
    pub pass_id: String,
    pub data_url: String,
}

/// Static form capture for an issued pass.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PressPassSubmission {
    #[serde(rename = "form-name", default)]
    pub form_name: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "issued-at")]
    pub issued_at: Option<String>,
}
