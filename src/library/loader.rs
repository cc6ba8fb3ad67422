use crossbeam_channel::{unbounded, Receiver, TryIter};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

use super::thumbnail::{extract_thumbnail, ThumbnailImage};
use crate::config::ThumbnailSettings;

/// Result for one entry: its index in the library and the thumbnail, if any
pub type LoadedThumbnail = (usize, Option<ThumbnailImage>);

/// Extracts thumbnails on a background thread, in entry order.
///
/// Dropping the loader detaches the worker; it stops at its next send.
pub struct ThumbnailLoader {
    receiver: Receiver<LoadedThumbnail>,
    handle: JoinHandle<()>,
}

impl ThumbnailLoader {
    /// Start extracting. `on_ready` runs on the worker after each result is
    /// sent, typically to wake the GUI.
    pub fn spawn<F>(paths: Vec<PathBuf>, settings: ThumbnailSettings, on_ready: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let (sender, receiver) = unbounded();

        let handle = thread::spawn(move || {
            let total = paths.len();
            for (index, path) in paths.into_iter().enumerate() {
                let thumbnail = extract_thumbnail(&path, &settings);
                if sender.send((index, thumbnail)).is_err() {
                    debug!("Thumbnail receiver gone, stopping after {} of {}", index, total);
                    return;
                }
                on_ready();
            }
            info!("Thumbnails extracted for {} videos", total);
        });

        Self { receiver, handle }
    }

    /// Results that arrived since the last call, without blocking
    pub fn try_iter(&self) -> TryIter<'_, LoadedThumbnail> {
        self.receiver.try_iter()
    }

    /// Whether the worker has finished and every result has been taken
    pub fn is_done(&self) -> bool {
        self.handle.is_finished() && self.receiver.is_empty()
    }
}
