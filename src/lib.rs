pub mod app;
pub mod config;
pub mod library;
pub mod menu;
pub mod player;
pub mod ui;

pub use app::VideoMenuApp;
pub use config::{MenuConfig, PlayerCommand, ThumbnailSettings, MENU_TITLE};
pub use library::{load_entries, VideoEntry};
pub use menu::{MenuController, MenuState, Visibility};
pub use player::{ExternalPlayer, Launcher, PlayerStatus};
