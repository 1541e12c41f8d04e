//! File-level template search.
//!
//! [`find_template_in_image`] validates both paths, decodes the image in color
//! and the template in grayscale, locates the template, draws the match and
//! optionally shows the intermediate steps and saves the annotation. It never
//! returns an error: every failure is logged and reported as `None`.
//! [`try_find_template_in_image`] runs the same pipeline with typed errors.

use crate::annotate::annotate;
use crate::image::io::{
    load_dynamic_image, owned_from_gray_image, save_rgb_image, view_from_gray_image,
};
use crate::search::{LocateConfig, Locator, MatchResult};
use crate::template::Template;
use crate::trace::{trace_info, trace_span, trace_warn};
use crate::util::{LocateError, LocateResult};
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Options for the file-level search.
#[derive(Clone, Debug, Default)]
pub struct FindOptions {
    /// Where to write the annotated image; nothing is written when `None`.
    pub output_path: Option<PathBuf>,
    /// Pass the input, template and result images to the step viewer.
    pub show_steps: bool,
    /// Matching parameters.
    pub config: LocateConfig,
}

/// Receives intermediate images when `show_steps` is enabled.
///
/// Implementations may block (for example until a key is pressed).
pub trait StepViewer {
    fn show(&mut self, title: &str, image: &DynamicImage);
}

/// Viewer that ignores every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoViewer;

impl StepViewer for NoViewer {
    fn show(&mut self, _title: &str, _image: &DynamicImage) {}
}

/// Finds `template_path` inside `image_path`.
///
/// Returns the match when its confidence reaches the configured threshold.
/// Missing or undecodable files, matching failures and a below-threshold best
/// score are logged and yield `None`. A failure to save the annotated image is
/// logged but does not change the result.
pub fn find_template_in_image(
    image_path: impl AsRef<Path>,
    template_path: impl AsRef<Path>,
    options: &FindOptions,
    viewer: &mut dyn StepViewer,
) -> Option<MatchResult> {
    match try_find_template_in_image(image_path, template_path, options, viewer) {
        Ok(found) => found,
        Err(err) => {
            trace_warn!("{err}");
            None
        }
    }
}

/// Same pipeline as [`find_template_in_image`] with errors returned to the
/// caller. Below-threshold results are `Ok(None)`.
pub fn try_find_template_in_image(
    image_path: impl AsRef<Path>,
    template_path: impl AsRef<Path>,
    options: &FindOptions,
    viewer: &mut dyn StepViewer,
) -> LocateResult<Option<MatchResult>> {
    let image_path = image_path.as_ref();
    let template_path = template_path.as_ref();
    let _span = trace_span!("find_template_in_image").entered();

    for (what, path) in [("image", image_path), ("template", template_path)] {
        if !path.exists() {
            return Err(LocateError::NotFound {
                what,
                path: path.to_path_buf(),
            });
        }
    }

    let color = load_dynamic_image(image_path)?;
    let template_gray = load_dynamic_image(template_path)?.to_luma8();
    let gray = color.to_luma8();
    let template = Template::from(owned_from_gray_image(&template_gray)?);

    if options.show_steps {
        viewer.show("Input Image", &color);
        viewer.show("Template", &DynamicImage::ImageLuma8(template_gray));
    }

    let locator = Locator::new(options.config);
    let Some(found) = locator.locate(view_from_gray_image(&gray)?, &template)? else {
        return Ok(None);
    };
    trace_info!(
        "found template at position (x={}, y={}) with size (w={}, h={}), confidence {:.2}",
        found.x,
        found.y,
        found.width,
        found.height,
        found.confidence
    );

    let annotated = annotate(&color.to_rgb8(), &found)?;
    if options.show_steps {
        viewer.show("Matching Result", &DynamicImage::ImageRgb8(annotated.clone()));
    }

    if let Some(path) = &options.output_path {
        match save_rgb_image(&annotated, path) {
            Ok(()) => trace_info!("result saved to {}", path.display()),
            Err(err) => trace_warn!("error saving output image: {err}"),
        }
    }

    Ok(Some(found))
}
