use std::time::Duration;

/// Window and menu heading text. Edit this line to rename the menu.
pub const MENU_TITLE: &str = "My Video Menu";

/// Which frame to grab and how large the thumbnail may get
#[derive(Clone, Debug, PartialEq)]
pub struct ThumbnailSettings {
    /// Zero-based index of the decoded frame used as the thumbnail
    pub frame_index: usize,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            frame_index: 24,
            max_width: 200,
            max_height: 150,
        }
    }
}

/// External player binary and the arguments placed before the file path
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for PlayerCommand {
    fn default() -> Self {
        Self {
            program: "vlc".to_owned(),
            args: vec!["--fullscreen".to_owned(), "--no-video-title-show".to_owned()],
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct MenuConfig {
    pub title: String,
    pub window_size: [f32; 2],
    pub page_size: usize,
    pub columns: usize,
    pub title_max_width: f32,
    pub title_font_size: f32,
    pub heading_font_size: f32,
    pub thumbnail: ThumbnailSettings,
    pub player: PlayerCommand,
    pub poll_interval: Duration,
    pub extensions: Vec<String>,
    pub prev_label: String,
    pub next_label: String,
    pub exit_label: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            title: MENU_TITLE.to_owned(),
            window_size: [1100.0, 700.0],
            page_size: 12,
            columns: 4,
            title_max_width: 200.0,
            title_font_size: 14.0,
            heading_font_size: 20.0,
            thumbnail: ThumbnailSettings::default(),
            player: PlayerCommand::default(),
            poll_interval: Duration::from_millis(100),
            extensions: ["mp4", "mpg", "mlv", "avi", "st"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            prev_label: "Previous".to_owned(),
            next_label: "Next".to_owned(),
            exit_label: "Exit".to_owned(),
        }
    }
}
