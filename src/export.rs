//! PNG export and import of pixel buffers.

use crate::config::ExportConfig;
use crate::draw::{DrawError, PixelBuffer};
use chrono::Local;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing or reading image files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Invalid pixel data: {0}")]
    Draw(#[from] DrawError),
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `extension` - File extension (e.g., "png")
///
/// # Returns
/// Generated filename with extension
pub fn generate_filename(template: &str, extension: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, extension)
}

/// Ensure the export directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Writes the buffer as a lossless RGBA PNG.
pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<(), ExportError> {
    let bytes = buffer.to_rgba_bytes();
    let expected = buffer.width() as usize * buffer.height() as usize * 4;
    let actual = bytes.len();
    let image = RgbaImage::from_raw(buffer.width(), buffer.height(), bytes)
        .ok_or(DrawError::BufferSizeMismatch { expected, actual })?;

    image.save_with_format(path, ImageFormat::Png)?;

    log::info!(
        "Saved {}x{} drawing to {}",
        buffer.width(),
        buffer.height(),
        path.display()
    );
    Ok(())
}

/// Saves the buffer under a generated name in the configured export directory.
///
/// # Returns
/// Path to the saved file
pub fn save_to_directory(
    buffer: &PixelBuffer,
    config: &ExportConfig,
) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&expand_tilde(&config.directory))?;
    let file_path = directory.join(generate_filename(&config.filename_template, "png"));
    save_png(buffer, &file_path)?;
    Ok(file_path)
}

/// Reads any image the `image` crate can decode into an RGBA buffer.
pub fn load_png(path: &Path) -> Result<PixelBuffer, ExportError> {
    let image = image::open(path)?.to_rgba8();
    let (width, height) = image.dimensions();
    log::debug!("Loaded {}x{} image from {}", width, height, path.display());
    Ok(PixelBuffer::from_rgba_bytes(width, height, image.as_raw())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Rgba;

    #[test]
    fn test_generate_filename() {
        let filename = generate_filename("drawing_%Y%m%d", "png");
        assert!(filename.starts_with("drawing_"));
        assert!(filename.ends_with(".png"));
        assert_eq!(filename.len(), "drawing_20260101.png".len());
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with('~'));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn png_keeps_exact_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let mut buffer = PixelBuffer::new(6, 4, Rgba::WHITE);
        buffer.set(0, 0, Rgba::TRANSPARENT);
        buffer.set(5, 3, Rgba::new(10, 20, 30, 128));
        save_png(&buffer, &path).unwrap();

        let loaded = load_png(&path).unwrap();
        assert_eq!(loaded, buffer);
    }

    #[test]
    fn save_to_directory_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            directory: dir.path().join("exports").to_string_lossy().into_owned(),
            filename_template: "fixed_name".to_string(),
        };

        let path = save_to_directory(&PixelBuffer::new(2, 2, Rgba::WHITE), &config).unwrap();

        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), "fixed_name.png");
    }

    #[test]
    fn loading_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        fs::write(&path, b"not a png").unwrap();
        assert!(matches!(load_png(&path), Err(ExportError::Encode(_))));
    }
}
