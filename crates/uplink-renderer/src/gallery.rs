//! Image display: decoded images are checked and written to disk.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::ImageReader;
use tracing::{info, warn};
use uplink_common::{ImageArtifact, UplinkError};

use crate::surface::ImageSurface;

/// An image the gallery has written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

pub struct ImageGallery<W: Write> {
    dir: PathBuf,
    out: W,
    /// Images from the most recent request.
    current: Vec<ShownImage>,
    notices: Vec<String>,
    counter: u32,
}

impl ImageGallery<std::io::Stdout> {
    pub fn stdout(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, std::io::stdout())
    }
}

impl<W: Write> ImageGallery<W> {
    pub fn new(dir: impl Into<PathBuf>, out: W) -> Self {
        Self {
            dir: dir.into(),
            out,
            current: Vec::new(),
            notices: Vec::new(),
            counter: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn current(&self) -> &[ShownImage] {
        &self.current
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!("gallery write failed: {e}");
        }
    }

    fn next_path(&mut self, extension: &str) -> PathBuf {
        self.counter += 1;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        self.dir
            .join(format!("uplink-{stamp}-{:02}.{extension}", self.counter))
    }
}

/// Read the image header to confirm the payload is a real image.
fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32), UplinkError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| UplinkError::Render(format!("unreadable image: {e}")))?
        .into_dimensions()
        .map_err(|e| UplinkError::Render(format!("undecodable image: {e}")))
}

impl<W: Write> ImageSurface for ImageGallery<W> {
    fn clear(&mut self) {
        self.current.clear();
    }

    fn show_image(&mut self, image: &ImageArtifact) -> Result<(), UplinkError> {
        let (width, height) = image_dimensions(&image.bytes)?;

        std::fs::create_dir_all(&self.dir)?;
        let path = self.next_path(image.extension());
        std::fs::write(&path, &image.bytes)?;

        info!(path = %path.display(), width, height, "Image written");
        self.emit(&format!(
            "[IMAGE] {width}x{height} {} -> {}",
            image.mime_type,
            path.display()
        ));
        self.current.push(ShownImage {
            path,
            width,
            height,
        });
        Ok(())
    }

    fn show_notice(&mut self, text: &str) {
        self.notices.push(text.to_string());
        self.emit(&format!("!! {text}"));
    }
}
