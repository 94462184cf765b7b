use std::path::Path;

use eframe::egui;
use thiserror::Error;
use tracing::debug;

/// Extensions accepted by the open-image dialogs.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("unsupported image extension '{0}'")]
    UnsupportedExtension(String),
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to decode GIF: {0}")]
    Gif(#[from] gif::DecodingError),
    #[error("GIF frame {0} has an invalid size")]
    BadFrame(usize),
    #[error("GIF contains no frames")]
    NoFrames,
}

/// Loads an image from disk as RGBA8 frames.
/// - png/jpg/jpeg: a single frame
/// - gif: every frame, composited onto the logical screen size
pub fn load_rgba_frames(path: &Path) -> Result<Vec<image::RgbaImage>, ImageLoadError> {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_ascii_lowercase();
    let frames = match ext.as_str() {
        "png" | "jpg" | "jpeg" => vec![image::open(path)?.to_rgba8()],
        "gif" => load_gif_frames(path)?,
        _ => return Err(ImageLoadError::UnsupportedExtension(ext)),
    };
    debug!(path = %path.display(), frames = frames.len(), "image loaded");
    Ok(frames)
}

fn load_gif_frames(path: &Path) -> Result<Vec<image::RgbaImage>, ImageLoadError> {
    let file = std::fs::File::open(path)?;
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options.read_info(file)?;
    let (w, h) = (decoder.width() as u32, decoder.height() as u32);

    let mut canvas = image::RgbaImage::new(w, h);
    let mut frames = Vec::new();
    while let Some(frame) = decoder.read_next_frame()? {
        let patch = image::RgbaImage::from_raw(
            frame.width as u32,
            frame.height as u32,
            frame.buffer.clone().into_owned(),
        )
        .ok_or(ImageLoadError::BadFrame(frames.len()))?;
        // sub-frames only cover part of the screen, draw them over the previous one
        image::imageops::overlay(&mut canvas, &patch, frame.left as i64, frame.top as i64);
        frames.push(canvas.clone());
    }
    if frames.is_empty() {
        return Err(ImageLoadError::NoFrames);
    }
    Ok(frames)
}

pub fn to_color_image(img: &image::RgbaImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [img.width() as usize, img.height() as usize],
        img.as_raw(),
    )
}

/// Frames of an opened image together with the texture of the visible frame.
pub struct LoadedImage {
    pub frames: Vec<image::RgbaImage>,
    pub current: usize,
    texture: Option<egui::TextureHandle>,
    texture_frame: usize,
}

impl LoadedImage {
    /// `frames` must not be empty.
    pub fn new(frames: Vec<image::RgbaImage>) -> Self {
        Self { frames, current: 0, texture: None, texture_frame: 0 }
    }

    pub fn open(path: &Path) -> Result<Self, ImageLoadError> {
        load_rgba_frames(path).map(Self::new)
    }

    pub fn frame(&self) -> &image::RgbaImage {
        &self.frames[self.current.min(self.frames.len() - 1)]
    }

    pub fn size(&self) -> egui::Vec2 {
        let f = self.frame();
        egui::vec2(f.width() as f32, f.height() as f32)
    }

    /// Uploads the current frame on first use or after the frame changed.
    pub fn texture(&mut self, ctx: &egui::Context, name: &str) -> &egui::TextureHandle {
        let tex = match self.texture.take() {
            Some(t) if self.texture_frame == self.current => t,
            _ => {
                self.texture_frame = self.current;
                ctx.load_texture(name, to_color_image(self.frame()), egui::TextureOptions::NEAREST)
            }
        };
        self.texture.insert(tex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_extension() {
        let err = load_rgba_frames(Path::new("sprite.bmp")).unwrap_err();
        assert!(matches!(err, ImageLoadError::UnsupportedExtension(e) if e == "bmp"));
    }

    #[test]
    fn loads_png_written_by_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255])).save(&path).unwrap();
        let frames = load_rgba_frames(&path).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].dimensions(), (3, 2));
    }
}
