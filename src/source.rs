/// Image source handling
///
/// The comparison flow does not care where the photo comes from: a file
/// picked from disk and a frame captured by the camera widget both arrive
/// here as the same `ImagePayload`. This module loads and sniffs picked
/// files and exposes the seam where a platform capture widget plugs in.
use std::io::Cursor;
use std::path::PathBuf;

use image::ImageReader;
use rfd::FileDialog;
use thiserror::Error;
use tokio::task;

/// File extensions offered by the picker dialog
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "bmp", "gif"];

/// Which widget currently feeds the form its photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// Native file picker dialog
    #[default]
    FileUpload,
    /// Live camera capture
    Camera,
}

/// A photo ready to be submitted for comparison
///
/// Produced identically by both sources and consumed identically by the
/// submission flow.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    /// Original file name, forwarded as the multipart attachment name
    pub file_name: String,
    /// Sniffed MIME type (e.g. "image/jpeg")
    pub mime_type: String,
    /// Raw encoded image bytes
    pub bytes: Vec<u8>,
    /// Pixel dimensions, read from the image header
    pub width: u32,
    pub height: u32,
}

impl ImagePayload {
    /// Short human-readable summary, e.g. "photo.jpg (640x480)"
    pub fn summary(&self) -> String {
        format!("{} ({}x{})", self.file_name, self.width, self.height)
    }
}

/// Errors while acquiring a photo from either source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("could not read {path}: {detail}")]
    Read { path: String, detail: String },

    #[error("{file_name} is not a supported image file")]
    NotAnImage { file_name: String },

    #[error("camera capture is not available on this platform")]
    CameraUnavailable,
}

/// Show the native file picker and return the chosen path, if any
///
/// Runs synchronously inside the update loop; the (potentially large) file
/// read happens afterwards in a background task.
pub fn pick_file() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select Photo to Compare")
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file()
}

/// Read a picked file from disk and sniff it into an `ImagePayload`
pub async fn load_payload(path: PathBuf) -> Result<ImagePayload, SourceError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());

    let bytes = tokio::fs::read(&path).await.map_err(|e| SourceError::Read {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;

    // Header sniffing decodes no pixel data, but keep it off the UI thread
    // anyway, matching how other decoding work is dispatched.
    let name = file_name.clone();
    task::spawn_blocking(move || inspect_bytes(name, bytes))
        .await
        .map_err(|e| SourceError::Read {
            path: path.display().to_string(),
            detail: format!("background task failed: {e}"),
        })?
}

/// Validate that `bytes` really are an encoded image and build the payload
///
/// Rejecting non-image files here keeps garbage from ever reaching the
/// comparison service.
pub fn inspect_bytes(file_name: String, bytes: Vec<u8>) -> Result<ImagePayload, SourceError> {
    let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
        .with_guessed_format()
        .map_err(|_| SourceError::NotAnImage {
            file_name: file_name.clone(),
        })?;

    let format = reader.format().ok_or_else(|| SourceError::NotAnImage {
        file_name: file_name.clone(),
    })?;

    // Only the header is parsed; the full bitmap is never decoded.
    let (width, height) = reader
        .into_dimensions()
        .map_err(|_| SourceError::NotAnImage {
            file_name: file_name.clone(),
        })?;

    Ok(ImagePayload {
        file_name,
        mime_type: format.to_mime_type().to_string(),
        bytes,
        width,
        height,
    })
}

/// Grab a frame from the camera capture widget
///
/// The capture widget itself is an external collaborator; this function is
/// the integration seam where a platform implementation gets wired in. The
/// frame it produces enters the flow as a regular `ImagePayload`.
pub async fn capture_frame() -> Result<ImagePayload, SourceError> {
    // No capture backend is wired up yet; surface that instead of guessing.
    Err(SourceError::CameraUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};

    /// Encode a tiny in-memory PNG for sniffing tests
    fn sample_png() -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::new_rgb8(4, 3)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_inspect_valid_png() {
        let payload = inspect_bytes("photo.png".to_string(), sample_png()).unwrap();

        assert_eq!(payload.file_name, "photo.png");
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!((payload.width, payload.height), (4, 3));
    }

    #[test]
    fn test_inspect_rejects_garbage() {
        let result = inspect_bytes("notes.txt".to_string(), b"not an image".to_vec());

        assert_eq!(
            result,
            Err(SourceError::NotAnImage {
                file_name: "notes.txt".to_string()
            })
        );
    }

    #[test]
    fn test_summary_includes_dimensions() {
        let payload = inspect_bytes("photo.png".to_string(), sample_png()).unwrap();
        assert_eq!(payload.summary(), "photo.png (4x3)");
    }

    #[tokio::test]
    async fn test_capture_unavailable_without_backend() {
        assert_eq!(capture_frame().await, Err(SourceError::CameraUnavailable));
    }

    #[tokio::test]
    async fn test_load_payload_missing_file() {
        let result = load_payload(PathBuf::from("/definitely/not/here.png")).await;
        assert!(matches!(result, Err(SourceError::Read { .. })));
    }
}
