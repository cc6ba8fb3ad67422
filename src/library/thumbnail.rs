use anyhow::{anyhow, bail, Context, Result};
use egui::ColorImage;
use ffmpeg_next::format::Pixel;
use ffmpeg_next::frame::Video as VideoFrame;
use ffmpeg_next::media::Type;
use ffmpeg_next::software::scaling::{Context as ScalerContext, Flags};
use ffmpeg_next::{codec, Packet};
use std::path::Path;
use tracing::{debug, warn};

use crate::config::ThumbnailSettings;

/// A decoded, downscaled RGBA frame with no row padding
#[derive(Clone, Debug)]
pub struct ThumbnailImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ThumbnailImage {
    /// Copy the first plane of an RGBA frame, dropping the stride padding
    fn from_rgba_frame(frame: &VideoFrame) -> Self {
        let width = frame.width();
        let height = frame.height();
        let stride = frame.stride(0);
        let data = frame.data(0);
        let row_len = width as usize * 4;

        let mut rgba = Vec::with_capacity(row_len * height as usize);
        for y in 0..height as usize {
            let row_start = y * stride;
            rgba.extend_from_slice(&data[row_start..row_start + row_len]);
        }

        Self { width, height, rgba }
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.rgba,
        )
    }
}

/// Grab the configured frame of `path` as a thumbnail.
///
/// Returns `None` when the file cannot be decoded or ends before the frame.
pub fn extract_thumbnail(path: &Path, settings: &ThumbnailSettings) -> Option<ThumbnailImage> {
    match decode_thumbnail(path, settings) {
        Ok(thumb) => {
            debug!(
                "Thumbnail for {}: {}x{}",
                path.display(),
                thumb.width,
                thumb.height
            );
            Some(thumb)
        }
        Err(e) => {
            warn!("No thumbnail for {}: {:#}", path.display(), e);
            None
        }
    }
}

fn decode_thumbnail(path: &Path, settings: &ThumbnailSettings) -> Result<ThumbnailImage> {
    let mut input = ffmpeg_next::format::input(path).context("Failed to open input file")?;

    let video_stream = input
        .streams()
        .best(Type::Video)
        .ok_or_else(|| anyhow!("No video stream found"))?;
    let stream_index = video_stream.index();

    let mut decoder = codec::Context::from_parameters(video_stream.parameters())?
        .decoder()
        .video()?;

    let mut decoded = VideoFrame::empty();
    let mut seen = 0usize;
    let mut at_eof = false;

    while !at_eof {
        let mut packet = Packet::empty();
        match packet.read(&mut input) {
            Ok(()) => {
                if packet.stream() != stream_index {
                    continue;
                }
                if let Err(e) = decoder.send_packet(&packet) {
                    // Corrupt packet, try the next one
                    debug!("Dropping packet in {}: {}", path.display(), e);
                    continue;
                }
            }
            Err(ffmpeg_next::Error::Eof) => {
                decoder.send_eof()?;
                at_eof = true;
            }
            Err(e) => return Err(e).context("Failed to read packet"),
        }

        while decoder.receive_frame(&mut decoded).is_ok() {
            if seen == settings.frame_index {
                return scale_frame(&decoded, settings);
            }
            seen += 1;
        }
    }

    bail!(
        "clip ends after {} frames, frame {} unavailable",
        seen,
        settings.frame_index
    )
}

/// Convert to RGBA and shrink into the thumbnail bounds in one scaler pass
fn scale_frame(frame: &VideoFrame, settings: &ThumbnailSettings) -> Result<ThumbnailImage> {
    let (width, height) = fit_within(
        frame.width(),
        frame.height(),
        settings.max_width,
        settings.max_height,
    );

    let mut scaler = ScalerContext::get(
        frame.format(),
        frame.width(),
        frame.height(),
        Pixel::RGBA,
        width,
        height,
        Flags::BILINEAR,
    )
    .context("Invalid scaler parameters")?;

    let mut rgba_frame = VideoFrame::empty();
    scaler
        .run(frame, &mut rgba_frame)
        .context("Failed to convert frame")?;

    Ok(ThumbnailImage::from_rgba_frame(&rgba_frame))
}

/// Size of a `width`x`height` image shrunk to fit `max_width`x`max_height`.
///
/// Images already inside the bounds keep their size. Otherwise the limiting
/// side takes the bound and the other side is whichever of floor or ceil
/// keeps the aspect ratio closest, never less than 1.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    if width == 0 || height == 0 {
        return (width.min(max_width), height.min(max_height));
    }

    let aspect = width as f64 / height as f64;
    let x = max_width as f64;
    let y = max_height as f64;

    if x / y >= aspect {
        let w = round_aspect(y * aspect, |n| (aspect - n / y).abs());
        (w, max_height)
    } else {
        let h = round_aspect(x / aspect, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - x / n).abs()
            }
        });
        (max_width, h)
    }
}

fn round_aspect(number: f64, error: impl Fn(f64) -> f64) -> u32 {
    let floor = number.floor();
    let ceil = number.ceil();
    let best = if error(ceil) < error(floor) { ceil } else { floor };
    (best as u32).max(1)
}
