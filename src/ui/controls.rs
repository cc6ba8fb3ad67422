use egui::{Align, Button, Layout, Ui};

use crate::config::MenuConfig;
use crate::menu::MenuState;

/// Button pressed in the control bar
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavAction {
    Prev,
    Next,
    Exit,
}

pub struct NavControls;

impl NavControls {
    pub fn show(ui: &mut Ui, config: &MenuConfig, state: &MenuState) -> Option<NavAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            // Previous page
            if ui
                .add_enabled(state.has_prev(), Button::new(config.prev_label.as_str()))
                .clicked()
            {
                action = Some(NavAction::Prev);
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                // Next page
                if ui
                    .add_enabled(state.has_next(), Button::new(config.next_label.as_str()))
                    .clicked()
                {
                    action = Some(NavAction::Next);
                }

                ui.label(format!("{} / {}", state.page() + 1, state.page_count()));
            });
        });

        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            if ui.button(config.exit_label.as_str()).clicked() {
                action = Some(NavAction::Exit);
            }
        });

        ui.add_space(10.0);

        action
    }
}
