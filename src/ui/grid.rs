use egui::{Button, Grid, ImageButton, Label, RichText, Sense, TextureHandle, Ui, Vec2};

use crate::config::MenuConfig;
use crate::menu::grid_position;

/// What the grid knows about a video's thumbnail
pub enum ThumbnailSlot {
    /// Still being extracted
    Pending,
    Ready(TextureHandle),
    /// Extraction failed
    Missing,
}

/// One clickable cell, bound to the entry's absolute index
pub struct GridCell<'a> {
    pub index: usize,
    pub title: &'a str,
    pub thumbnail: &'a ThumbnailSlot,
}

pub struct VideoGrid;

impl VideoGrid {
    /// Lay out `cells` row by row. Returns the index of a clicked cell.
    pub fn show(ui: &mut Ui, config: &MenuConfig, cells: &[GridCell<'_>]) -> Option<usize> {
        let mut clicked = None;

        Grid::new("video_grid")
            .spacing([20.0, 20.0])
            .show(ui, |ui| {
                for (relative, cell) in cells.iter().enumerate() {
                    let (row, column) = grid_position(relative, config.columns);
                    if column == 0 && row > 0 {
                        ui.end_row();
                    }
                    if show_cell(ui, config, cell) {
                        clicked = Some(cell.index);
                    }
                }
            });

        clicked
    }
}

fn show_cell(ui: &mut Ui, config: &MenuConfig, cell: &GridCell<'_>) -> bool {
    let bounds = Vec2::new(
        config.thumbnail.max_width as f32,
        config.thumbnail.max_height as f32,
    );

    ui.vertical_centered(|ui| {
        ui.set_width(bounds.x.max(config.title_max_width));

        let image = match cell.thumbnail {
            ThumbnailSlot::Ready(texture) => {
                ui.add(ImageButton::new((texture.id(), texture.size_vec2())))
            }
            ThumbnailSlot::Pending => ui.add_sized(bounds, Button::new("Loading...")),
            ThumbnailSlot::Missing => ui.add_sized(bounds, Button::new("No preview")),
        };

        let title = ui.add(
            Label::new(RichText::new(cell.title).size(config.title_font_size))
                .sense(Sense::click()),
        );

        image.clicked() || title.clicked()
    })
    .inner
}
