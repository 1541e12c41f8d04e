//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage};
use crate::util::{LocateError, LocateResult};
use image::{DynamicImage, GrayImage, ImageReader, RgbImage};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &GrayImage) -> LocateResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Creates an owned image from a grayscale image buffer.
pub fn owned_from_gray_image(img: &GrayImage) -> LocateResult<OwnedImage> {
    OwnedImage::new(
        img.as_raw().clone(),
        img.width() as usize,
        img.height() as usize,
    )
}

/// Creates an owned grayscale image from a dynamic image of any color depth.
pub fn owned_from_dynamic_image(img: &DynamicImage) -> LocateResult<OwnedImage> {
    let gray = img.to_luma8();
    owned_from_gray_image(&gray)
}

/// Decodes an image file, failing with `NotFound` when the path is missing.
///
/// The format is detected from the file contents, so a missing or wrong
/// extension does not matter.
pub fn load_dynamic_image<P: AsRef<Path>>(path: P) -> LocateResult<DynamicImage> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LocateError::NotFound {
            what: "image",
            path: path.to_path_buf(),
        });
    }
    let read_err = |err: &dyn std::fmt::Display| LocateError::ImageIo {
        reason: format!("could not read {}: {err}", path.display()),
    };
    ImageReader::open(path)
        .map_err(|err| read_err(&err))?
        .with_guessed_format()
        .map_err(|err| read_err(&err))?
        .decode()
        .map_err(|err| read_err(&err))
}

/// Loads an image from disk and converts it to a grayscale owned image.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> LocateResult<OwnedImage> {
    let img = load_dynamic_image(path)?;
    owned_from_dynamic_image(&img)
}

/// Encodes an RGB image to `path`; the format follows the file extension.
pub fn save_rgb_image<P: AsRef<Path>>(img: &RgbImage, path: P) -> LocateResult<()> {
    let path = path.as_ref();
    img.save(path).map_err(|err| LocateError::ImageIo {
        reason: format!("could not write {}: {err}", path.display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn gray_buffer_round_trips_into_owned_image() {
        let gray = GrayImage::from_fn(5, 3, |x, y| Luma([(x * 10 + y) as u8]));
        let owned = owned_from_gray_image(&gray).unwrap();
        assert_eq!((owned.width(), owned.height()), (5, 3));
        assert_eq!(owned.view().get(4, 2).copied(), Some(42));

        let view = view_from_gray_image(&gray).unwrap();
        assert_eq!(view.row(1).unwrap(), &[1u8, 11, 21, 31, 41]);
    }

    #[test]
    fn missing_file_reports_not_found() {
        let path = std::env::temp_dir().join("templocate-io-definitely-missing.png");
        let err = load_gray_image(&path).unwrap_err();
        assert_eq!(
            err,
            LocateError::NotFound {
                what: "image",
                path
            }
        );
    }

    #[test]
    fn format_is_detected_from_contents() {
        let dir = std::env::temp_dir().join(format!("templocate-io-sniff-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let gray = GrayImage::from_fn(6, 4, |x, y| Luma([(x * 30 + y * 7) as u8]));
        let no_ext = dir.join("scene");
        let wrong_ext = dir.join("scene.jpg");
        gray.save_with_format(&no_ext, image::ImageFormat::Png).unwrap();
        gray.save_with_format(&wrong_ext, image::ImageFormat::Png).unwrap();

        for path in [&no_ext, &wrong_ext] {
            let owned = load_gray_image(path).unwrap();
            assert_eq!((owned.width(), owned.height()), (6, 4));
            assert_eq!(owned.view().get(5, 3).copied(), Some(171));
        }
        let _ = std::fs::remove_dir_all(&dir);
    }
}
