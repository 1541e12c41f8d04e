//! Template storage and planning utilities.

use crate::image::{ImageView, OwnedImage};
use crate::util::LocateResult;

mod plan;

pub use plan::TemplatePlan;

/// Owned template image in contiguous grayscale format.
#[derive(Clone, Debug)]
pub struct Template {
    img: OwnedImage,
}

impl Template {
    /// Creates a template from a contiguous grayscale buffer.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> LocateResult<Self> {
        let img = OwnedImage::new(data, width, height)?;
        Ok(Self { img })
    }

    /// Copies a (possibly strided) view into a new template.
    pub fn from_view(view: ImageView<'_, u8>) -> LocateResult<Self> {
        Ok(Self {
            img: OwnedImage::from_view(view)?,
        })
    }

    /// Template width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Template height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns a borrowed view of the template data.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    /// Precomputes the zero-mean buffer and energy used by the kernels.
    pub fn plan(&self) -> LocateResult<TemplatePlan> {
        TemplatePlan::from_view(self.view())
    }
}

impl From<OwnedImage> for Template {
    fn from(img: OwnedImage) -> Self {
        Self { img }
    }
}
