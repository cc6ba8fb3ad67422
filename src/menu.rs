use anyhow::Result;
use std::ops::Range;
use tracing::{debug, info};

use crate::library::VideoEntry;
use crate::player::{Launcher, PlayerStatus, Spawn};

/// Whether the menu window is on screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Visibility {
    Shown,
    Hidden,
}

/// Current page and visibility of the menu
#[derive(Clone, Debug)]
pub struct MenuState {
    page: usize,
    page_size: usize,
    total: usize,
    visibility: Visibility,
}

impl MenuState {
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            total,
            visibility: Visibility::Shown,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages, at least one even when there is nothing to show
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_shown(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    /// Absolute indices of the entries on the current page
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.page * self.page_size).min(self.total);
        let end = ((self.page + 1) * self.page_size).min(self.total);
        start..end
    }

    pub fn has_next(&self) -> bool {
        (self.page + 1) * self.page_size < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// Move one page forward. Returns false and does nothing on the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Move one page back. Returns false and does nothing on the first page.
    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
    }

    /// Back to the page that was shown before the player started
    pub fn player_exited(&mut self) {
        self.visibility = Visibility::Shown;
    }
}

/// Row and column of the `relative`th cell on a page
pub fn grid_position(relative: usize, columns: usize) -> (usize, usize) {
    let columns = columns.max(1);
    (relative / columns, relative % columns)
}

/// Ties the menu state to the videos and the player
pub struct MenuController<S: Spawn> {
    entries: Vec<VideoEntry>,
    state: MenuState,
    launcher: Launcher<S>,
}

impl<S: Spawn> MenuController<S> {
    pub fn new(entries: Vec<VideoEntry>, page_size: usize, spawner: S) -> Self {
        let state = MenuState::new(entries.len(), page_size);
        Self {
            entries,
            state,
            launcher: Launcher::new(spawner),
        }
    }

    pub fn entries(&self) -> &[VideoEntry] {
        &self.entries
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn next_page(&mut self) -> bool {
        self.state.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.state.prev_page()
    }

    /// Play entry `index` and hide the menu.
    ///
    /// Returns `Ok(false)` for an index with no entry. On a spawn error the
    /// menu stays shown.
    pub fn select(&mut self, index: usize) -> Result<bool> {
        let Some(entry) = self.entries.get(index) else {
            debug!("Ignoring selection of missing entry {}", index);
            return Ok(false);
        };

        self.launcher.select(entry.path())?;
        self.state.hide();
        info!("Playing {}", entry.file_name());
        Ok(true)
    }

    /// Poll the player once. Returns true when the menu was just restored.
    pub fn poll_player(&mut self) -> bool {
        let status = self.launcher.poll();
        if self.state.is_shown() {
            return false;
        }

        match status {
            PlayerStatus::Running => false,
            PlayerStatus::Exited | PlayerStatus::Idle => {
                self.state.player_exited();
                true
            }
        }
    }

    /// Stop any player before the application ends
    pub fn exit(&mut self) {
        self.launcher.stop();
    }

    #[cfg(test)]
    pub(crate) fn has_player(&self) -> bool {
        self.launcher.has_player()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::fake::FakePlayers;
    use std::path::PathBuf;

    fn entries(count: usize) -> Vec<VideoEntry> {
        (0..count)
            .map(|i| VideoEntry::new(PathBuf::from(format!("video{i:02}.mp4"))))
            .collect()
    }

    #[test]
    fn fourteen_videos_make_two_pages() {
        let mut state = MenuState::new(14, 12);
        assert_eq!(state.page_range(), 0..12);
        assert_eq!(state.page_count(), 2);

        assert!(state.next_page());
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_range(), 12..14);

        assert!(!state.next_page());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn prev_page_stops_at_first_page() {
        let mut state = MenuState::new(30, 12);
        assert!(!state.prev_page());
        assert_eq!(state.page(), 0);

        state.next_page();
        state.next_page();
        assert_eq!(state.page_range(), 24..30);
        assert!(state.prev_page());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn exact_multiple_has_no_empty_trailing_page() {
        let mut state = MenuState::new(24, 12);
        assert!(state.next_page());
        assert!(!state.next_page());
        assert_eq!(state.page_range(), 12..24);
    }

    #[test]
    fn empty_library_shows_nothing() {
        let mut state = MenuState::new(0, 12);
        assert!(state.page_range().is_empty());
        assert_eq!(state.page_count(), 1);
        assert!(!state.next_page());
        assert!(!state.prev_page());
        assert!(state.is_shown());
    }

    #[test]
    fn cells_fill_four_columns() {
        assert_eq!(grid_position(0, 4), (0, 0));
        assert_eq!(grid_position(3, 4), (0, 3));
        assert_eq!(grid_position(4, 4), (1, 0));
        assert_eq!(grid_position(11, 4), (2, 3));
    }

    #[test]
    fn selecting_hides_menu_until_player_exits() {
        let players = FakePlayers::default();
        let mut menu = MenuController::new(entries(14), 12, players.clone());
        menu.next_page();
        menu.select(12).unwrap();

        // An earlier player is still running when entry 5 is picked
        assert!(menu.select(5).unwrap());

        assert_eq!(players.terminated(), [0]);
        assert_eq!(players.spawned().last(), Some(&PathBuf::from("video05.mp4")));
        assert_eq!(menu.state().visibility(), Visibility::Hidden);
        assert!(!menu.poll_player());

        players.finish(1);

        assert!(menu.poll_player());
        assert!(menu.state().is_shown());
        assert_eq!(menu.state().page(), 1);
        assert!(!menu.has_player());
    }

    #[test]
    fn failed_spawn_keeps_menu_visible() {
        let players = FakePlayers::default();
        let mut menu = MenuController::new(entries(3), 12, players.clone());
        players.fail_next();

        assert!(menu.select(1).is_err());

        assert!(menu.state().is_shown());
        assert!(!menu.has_player());
        assert!(!menu.poll_player());
    }

    #[test]
    fn selecting_missing_entry_is_ignored() {
        let players = FakePlayers::default();
        let mut menu = MenuController::new(entries(0), 12, players.clone());

        assert!(!menu.select(0).unwrap());
        assert!(players.spawned().is_empty());
        assert!(menu.state().is_shown());
    }

    #[test]
    fn exit_terminates_player() {
        let players = FakePlayers::default();
        let mut menu = MenuController::new(entries(2), 12, players.clone());
        menu.select(0).unwrap();

        menu.exit();

        assert_eq!(players.terminated(), [0]);
        assert_eq!(players.live_count(), 0);
    }
}
