use chrono::{SecondsFormat, Utc};

use crate::{
    card::{CardRenderer, CardRequest, DrawingSurface, PassId, RasterSurface},
    dto::passes::PressPassSubmission,
    error::{AppError, AppResult},
};

pub const PASS_FORM_NAME: &str = "press-passes";

pub struct RenderedPass {
    pub id: PassId,
    pub surface: RasterSurface,
}

pub fn render_pass(renderer: &CardRenderer, request: &CardRequest) -> AppResult<RenderedPass> {
    let mut surface = RasterSurface::default();
    let id = renderer
        .render(Some(&mut surface as &mut dyn DrawingSurface), request)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("drawing surface unavailable")))?;
    Ok(RenderedPass { id, surface })
}

/// Sink for captured pass submissions.
pub trait SubmissionLog: Send + Sync {
    fn record(&self, submission: &PressPassSubmission);
}

/// Captures submissions as structured log events only.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSubmissionLog;

impl SubmissionLog for TracingSubmissionLog {
    fn record(&self, submission: &PressPassSubmission) {
        tracing::info!(
            form = submission.form_name.as_deref().unwrap_or(PASS_FORM_NAME),
            name = %submission.name,
            title = %submission.title,
            issued_at = submission.issued_at.as_deref().unwrap_or("-"),
            "press pass issued"
        );
    }
}

/// Fill in the form name and, when the page sent none, an issue time of now.
pub fn complete_submission(mut submission: PressPassSubmission) -> PressPassSubmission {
    if submission.form_name.as_deref().is_none_or(str::is_empty) {
        submission.form_name = Some(PASS_FORM_NAME.to_string());
    }
    if submission.issued_at.as_deref().is_none_or(|at| at.trim().is_empty()) {
        submission.issued_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
    }
    submission
}

pub fn capture_submission(log: &dyn SubmissionLog, submission: PressPassSubmission) {
    log.record(&complete_submission(submission));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_pass_is_card_sized() {
        let renderer = CardRenderer::default();
        let pass = render_pass(&renderer, &CardRequest::new("Jane Doe", "")).expect("render");

        assert_eq!(pass.surface.width(), 400);
        assert_eq!(pass.surface.height(), 600);
        assert!(PassId::is_well_formed(pass.id.as_str()));
    }

    fn submission(issued_at: Option<&str>) -> PressPassSubmission {
        PressPassSubmission {
            form_name: None,
            name: "Jane Doe".into(),
            title: "Editor".into(),
            issued_at: issued_at.map(String::from),
        }
    }

    #[test]
    fn missing_fields_are_completed() {
        let completed = complete_submission(submission(None));

        assert_eq!(completed.form_name.as_deref(), Some(PASS_FORM_NAME));
        assert!(completed.issued_at.is_some_and(|at| at.ends_with('Z')));
        assert_eq!(completed.name, "Jane Doe");
    }

    #[test]
    fn page_timestamp_is_kept() {
        let completed = complete_submission(submission(Some("2026-10-18T12:00:00.000Z")));
        assert_eq!(completed.issued_at.as_deref(), Some("2026-10-18T12:00:00.000Z"));
    }
}
