//! Templocate finds a template image inside a larger image.
//!
//! Every placement is scored with zero-mean normalized cross-correlation
//! (ZNCC, scores in `[-1, 1]`) and the best one is accepted when it reaches a
//! confidence threshold (0.8 by default). The pure matching core works on
//! borrowed grayscale views; the `image-io` feature adds file loading,
//! annotation of the match, and the file-level [`find_template_in_image`]
//! operation. Row-parallel scanning is available with the `rayon` feature.

#[cfg(feature = "image-io")]
pub mod annotate;
mod candidate;
#[cfg(feature = "image-io")]
pub mod find;
pub mod image;
pub mod kernel;
pub mod search;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use crate::image::{ImageView, OwnedImage};
pub use kernel::{Kernel, ScanParams};
pub use template::{Template, TemplatePlan};
pub use util::{LocateError, LocateResult};

#[cfg(feature = "image-io")]
pub use annotate::annotate;
pub use candidate::nms::nms_2d;
pub use candidate::topk::{Peak, TopK};
#[cfg(feature = "image-io")]
pub use find::{
    find_template_in_image, try_find_template_in_image, FindOptions, NoViewer, StepViewer,
};
pub use search::{
    LocateConfig, Locator, MatchResult, MinMaxLoc, ScoreMap, DEFAULT_THRESHOLD,
};
