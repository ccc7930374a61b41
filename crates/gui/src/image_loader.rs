//! Floor plan intake: type/size validation, decode, downscale and fit.
//!
//! The geometry core never sees original image dimensions; it only gets the
//! fitted canvas size produced here.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageFormat};
use shared::CanvasSize;
use tokio::sync::oneshot;

use crate::error::ImageLoadError;

/// Files above this size are rejected before any processing
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
/// Longer side of a downscaled image
pub const MAX_DIMENSION: u32 = 2000;
/// JPEG quality used when a downscaled image is re-encoded
pub const JPEG_QUALITY: u8 = 85;

/// Decoded, display-ready floor plan pixels
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major, `width * height * 4` bytes
    pub rgba: Vec<u8>,
    /// Size before downscaling
    pub original_width: u32,
    pub original_height: u32,
    /// Re-encoded JPEG bytes when the image was downscaled
    pub encoded: Option<Vec<u8>>,
}

impl PreparedImage {
    pub fn was_downscaled(&self) -> bool {
        self.encoded.is_some()
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width as f64, self.height as f64)
    }
}

/// MIME type must be `image/*`
pub fn validate_mime(mime: &str) -> Result<(), ImageLoadError> {
    if mime.trim().to_ascii_lowercase().starts_with("image/") {
        Ok(())
    } else {
        Err(ImageLoadError::NotAnImage {
            mime: mime.to_string(),
        })
    }
}

pub fn validate_size(size: u64) -> Result<(), ImageLoadError> {
    if size > MAX_FILE_BYTES {
        Err(ImageLoadError::TooLarge {
            size,
            max: MAX_FILE_BYTES,
        })
    } else {
        Ok(())
    }
}

/// MIME type guessed from the file extension (empty if unknown)
pub fn mime_for_path(path: &Path) -> String {
    ImageFormat::from_path(path)
        .map(|f| f.to_mime_type().to_string())
        .unwrap_or_default()
}

/// Validate type and size, then read the file
pub fn read_image_file(path: &Path) -> Result<(Vec<u8>, String), ImageLoadError> {
    let mime = mime_for_path(path);
    validate_mime(&mime)?;
    let size = std::fs::metadata(path)?.len();
    validate_size(size)?;
    let bytes = std::fs::read(path)?;
    Ok((bytes, mime))
}

/// Target size when the longer side exceeds `max`, keeping the aspect ratio
pub fn downscaled_dimensions(width: u32, height: u32, max: u32) -> Option<(u32, u32)> {
    if width <= max && height <= max {
        return None;
    }
    let (w, h) = (width as f64, height as f64);
    let (nw, nh) = if width > height {
        (max as f64, h * (max as f64 / w))
    } else {
        (w * (max as f64 / h), max as f64)
    };
    Some(((nw as u32).max(1), (nh as u32).max(1)))
}

/// Fit an image into a container, preserving aspect ratio (may upscale)
pub fn fit_to_container(image: CanvasSize, container: CanvasSize) -> CanvasSize {
    if image.is_empty() || container.is_empty() {
        return image;
    }
    let scale = (container.width / image.width).min(container.height / image.height);
    CanvasSize::new(image.width * scale, image.height * scale)
}

/// Validate, decode and (if needed) downscale + re-encode an image
pub fn prepare_image(bytes: &[u8], mime: &str) -> Result<PreparedImage, ImageLoadError> {
    validate_mime(mime)?;
    validate_size(bytes.len() as u64)?;

    let img = image::load_from_memory(bytes).map_err(ImageLoadError::Decode)?;
    let (original_width, original_height) = (img.width(), img.height());

    let (img, encoded) = match downscaled_dimensions(original_width, original_height, MAX_DIMENSION)
    {
        Some((w, h)) => {
            tracing::info!(
                "Downscaling {original_width}x{original_height} -> {w}x{h}"
            );
            let resized = img.resize_exact(w, h, FilterType::Triangle);
            let jpeg = encode_jpeg(&resized)?;
            let reloaded = image::load_from_memory_with_format(&jpeg, ImageFormat::Jpeg)
                .map_err(ImageLoadError::Decode)?;
            (reloaded, Some(jpeg))
        }
        None => (img, None),
    };

    let rgba = img.to_rgba8();
    Ok(PreparedImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
        original_width,
        original_height,
        encoded,
    })
}

fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>, ImageLoadError> {
    let rgb = img.to_rgb8();
    let mut bytes: Vec<u8> = Vec::new();
    {
        let mut cursor = Cursor::new(&mut bytes);
        let mut encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        encoder
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
            .map_err(ImageLoadError::Encode)?;
    }
    Ok(bytes)
}

// ============================================================================
// Background decode
// ============================================================================

/// Decode running off the UI thread, polled once per frame
pub struct ImageLoadJob {
    rx: oneshot::Receiver<Result<PreparedImage, ImageLoadError>>,
}

impl ImageLoadJob {
    /// Start decoding `bytes` on a worker thread
    pub fn spawn(bytes: Vec<u8>, mime: String) -> Self {
        let (tx, rx) = oneshot::channel();
        std::thread::spawn(move || {
            let result = prepare_image(&bytes, &mime);
            if tx.send(result).is_err() {
                tracing::debug!("Image load job dropped before completion");
            }
        });
        Self { rx }
    }

    /// `Some` once the worker has finished
    pub fn poll(&mut self) -> Option<Result<PreparedImage, ImageLoadError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(ImageLoadError::Interrupted)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_validate_mime() {
        assert!(validate_mime("image/png").is_ok());
        assert!(validate_mime("IMAGE/JPEG").is_ok());
        assert!(matches!(
            validate_mime("application/pdf"),
            Err(ImageLoadError::NotAnImage { .. })
        ));
        assert!(validate_mime("").is_err());
    }

    #[test]
    fn test_validate_size() {
        assert!(validate_size(MAX_FILE_BYTES).is_ok());
        assert!(matches!(
            validate_size(MAX_FILE_BYTES + 1),
            Err(ImageLoadError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("plan.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("plan.jpg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("notes.txt")), "");
    }

    #[test]
    fn test_downscaled_dimensions() {
        assert_eq!(downscaled_dimensions(1200, 800, 2000), None);
        assert_eq!(downscaled_dimensions(2000, 2000, 2000), None);
        assert_eq!(downscaled_dimensions(4000, 3000, 2000), Some((2000, 1500)));
        assert_eq!(downscaled_dimensions(1000, 5000, 2000), Some((400, 2000)));
        assert_eq!(downscaled_dimensions(3000, 3000, 2000), Some((2000, 2000)));
    }

    #[test]
    fn test_fit_to_container() {
        let fitted = fit_to_container(CanvasSize::new(2000.0, 1000.0), CanvasSize::new(800.0, 600.0));
        assert_eq!(fitted, CanvasSize::new(800.0, 400.0));
        // Small images are scaled up
        let fitted = fit_to_container(CanvasSize::new(100.0, 200.0), CanvasSize::new(800.0, 600.0));
        assert_eq!(fitted, CanvasSize::new(300.0, 600.0));
    }

    #[test]
    fn test_prepare_small_image_untouched() {
        let prepared = prepare_image(&png_bytes(64, 32), "image/png").unwrap();
        assert_eq!((prepared.width, prepared.height), (64, 32));
        assert!(!prepared.was_downscaled());
        assert_eq!(prepared.rgba.len(), 64 * 32 * 4);
    }

    #[test]
    fn test_prepare_large_image_downscaled() {
        let prepared = prepare_image(&png_bytes(2400, 600), "image/png").unwrap();
        assert_eq!((prepared.width, prepared.height), (2000, 500));
        assert_eq!((prepared.original_width, prepared.original_height), (2400, 600));
        let jpeg = prepared.encoded.as_ref().unwrap();
        assert_eq!(image::guess_format(jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_prepare_rejects_garbage() {
        let err = prepare_image(b"definitely not a png", "image/png").unwrap_err();
        assert!(matches!(err, ImageLoadError::Decode(_)));
    }

    #[test]
    fn test_prepare_rejects_wrong_mime() {
        let err = prepare_image(&png_bytes(4, 4), "text/plain").unwrap_err();
        assert!(matches!(err, ImageLoadError::NotAnImage { .. }));
    }

    #[test]
    fn test_background_job() {
        let mut job = ImageLoadJob::spawn(png_bytes(8, 8), "image/png".into());
        let result = loop {
            if let Some(r) = job.poll() {
                break r;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        };
        assert_eq!(result.unwrap().width, 8);
    }

    #[test]
    fn test_read_rejects_non_image_extension() {
        let err = read_image_file(Path::new("floor.txt")).unwrap_err();
        assert!(matches!(err, ImageLoadError::NotAnImage { .. }));
    }
}
