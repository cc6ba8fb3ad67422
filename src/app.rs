use egui::{CentralPanel, Color32, Context, FontId, RichText, TextureOptions, TopBottomPanel, ViewportCommand};
use tracing::{debug, error};

use crate::config::MenuConfig;
use crate::library::{ThumbnailLoader, VideoEntry};
use crate::menu::{MenuController, Visibility};
use crate::player::ExternalPlayer;
use crate::ui::controls::{NavAction, NavControls};
use crate::ui::grid::{GridCell, ThumbnailSlot, VideoGrid};
use crate::ui::title::{format_title, EguiMeasure};

/// Per-entry view data, filled in as it becomes available
struct MenuItem {
    title: Option<String>,
    thumbnail: ThumbnailSlot,
}

pub struct VideoMenuApp {
    config: MenuConfig,
    controller: MenuController<ExternalPlayer>,
    items: Vec<MenuItem>,
    loader: Option<ThumbnailLoader>,
    error_message: Option<String>,
}

impl VideoMenuApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: MenuConfig, entries: Vec<VideoEntry>) -> Self {
        let paths = entries.iter().map(|e| e.path().to_path_buf()).collect();
        let ctx = cc.egui_ctx.clone();
        let loader = ThumbnailLoader::spawn(paths, config.thumbnail.clone(), move || {
            ctx.request_repaint();
        });

        let items = entries
            .iter()
            .map(|_| MenuItem {
                title: None,
                thumbnail: ThumbnailSlot::Pending,
            })
            .collect();

        let player = ExternalPlayer::new(config.player.clone());
        let controller = MenuController::new(entries, config.page_size, player);

        Self {
            config,
            controller,
            items,
            loader: Some(loader),
            error_message: None,
        }
    }

    /// Turn finished extractions into textures
    fn receive_thumbnails(&mut self, ctx: &Context) {
        let Some(loader) = self.loader.as_ref() else {
            return;
        };

        for (index, thumbnail) in loader.try_iter() {
            let Some(item) = self.items.get_mut(index) else {
                continue;
            };
            item.thumbnail = match thumbnail {
                Some(image) => ThumbnailSlot::Ready(ctx.load_texture(
                    format!("thumbnail_{index}"),
                    image.to_color_image(),
                    TextureOptions::LINEAR,
                )),
                None => ThumbnailSlot::Missing,
            };
        }

        if loader.is_done() {
            debug!("Thumbnail loader finished");
            self.loader = None;
        }
    }

    /// Titles need font metrics, so they are measured on the first frame
    fn format_titles(&mut self, ctx: &Context) {
        let measure = EguiMeasure::new(ctx, FontId::proportional(self.config.title_font_size));
        let entries = self.controller.entries();

        for (item, entry) in self.items.iter_mut().zip(entries) {
            if item.title.is_none() {
                item.title = Some(format_title(
                    &measure,
                    entry.file_name(),
                    self.config.title_max_width,
                ));
            }
        }
    }

    fn select(&mut self, ctx: &Context, index: usize) {
        match self.controller.select(index) {
            Ok(true) => {
                self.error_message = None;
                ctx.send_viewport_cmd(ViewportCommand::Visible(false));
                ctx.request_repaint_after(self.config.poll_interval);
            }
            Ok(false) => {}
            Err(e) => {
                error!("{:#}", e);
                self.error_message = Some(format!("Failed to play video: {:#}", e));
            }
        }
    }

    fn exit(&mut self, ctx: &Context) {
        self.controller.exit();
        ctx.send_viewport_cmd(ViewportCommand::Close);
    }
}

impl eframe::App for VideoMenuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.receive_thumbnails(ctx);

        // Player watch: re-arm until it exits, then bring the menu back
        if self.controller.state().visibility() == Visibility::Hidden {
            if self.controller.poll_player() {
                ctx.send_viewport_cmd(ViewportCommand::Visible(true));
                ctx.send_viewport_cmd(ViewportCommand::Focus);
            } else {
                ctx.request_repaint_after(self.config.poll_interval);
            }
        }

        self.format_titles(ctx);

        // Heading
        TopBottomPanel::top("heading").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.label(RichText::new(&self.config.title).size(self.config.heading_font_size));
                if let Some(ref err) = self.error_message {
                    ui.colored_label(Color32::RED, err);
                }
                ui.add_space(20.0);
            });
        });

        // Page controls
        let mut action = None;
        TopBottomPanel::bottom("controls").show(ctx, |ui| {
            action = NavControls::show(ui, &self.config, self.controller.state());
        });

        // Thumbnail grid for the current page
        let mut selected = None;
        CentralPanel::default().show(ctx, |ui| {
            let range = self.controller.state().page_range();
            let cells: Vec<GridCell<'_>> = range
                .map(|index| {
                    let item = &self.items[index];
                    GridCell {
                        index,
                        title: item.title.as_deref().unwrap_or_default(),
                        thumbnail: &item.thumbnail,
                    }
                })
                .collect();

            selected = VideoGrid::show(ui, &self.config, &cells);
        });

        match action {
            Some(NavAction::Prev) => {
                self.controller.prev_page();
            }
            Some(NavAction::Next) => {
                self.controller.next_page();
            }
            Some(NavAction::Exit) => self.exit(ctx),
            None => {}
        }

        if let Some(index) = selected {
            self.select(ctx, index);
        }
    }
}
