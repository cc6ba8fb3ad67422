use egui::{Color32, Context, FontId};
use std::path::Path;

const ELLIPSIS: &str = "...";

/// Rendered width of a string in some display context
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> f32;
}

/// Measures with the fonts of a live egui context
pub struct EguiMeasure<'a> {
    ctx: &'a Context,
    font: FontId,
}

impl<'a> EguiMeasure<'a> {
    pub fn new(ctx: &'a Context, font: FontId) -> Self {
        Self { ctx, font }
    }
}

impl TextMeasure for EguiMeasure<'_> {
    fn text_width(&self, text: &str) -> f32 {
        self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(text.to_owned(), self.font.clone(), Color32::WHITE)
                .size()
                .x
        })
    }
}

/// Strip the extension from `file_name` and shorten it to `max_width` pixels.
///
/// Shortened titles end in `...`; titles that already fit come back without it.
pub fn format_title(measure: &impl TextMeasure, file_name: &str, max_width: f32) -> String {
    let mut title = strip_extension(file_name).to_owned();

    if measure.text_width(&title) <= max_width {
        return title;
    }

    while title.pop().is_some() {
        let candidate = format!("{title}{ELLIPSIS}");
        if measure.text_width(&candidate) <= max_width {
            return candidate;
        }
    }

    ELLIPSIS.to_owned()
}

fn strip_extension(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
}
