//! Template plan precomputation for ZNCC scoring.

use crate::image::ImageView;
use crate::util::{LocateError, LocateResult};

/// Precomputed statistics and zero-mean buffer for template matching.
///
/// Holds `t' = t - mean` in row-major order and `var_t = Σ t'²`. A template
/// whose pixels are all equal is kept but marked flat, since the correlation
/// against it is undefined and scored separately by the kernels.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    mean: f32,
    var_t: f32,
    flat: bool,
    t_prime: Vec<f32>,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: ImageView<'_, u8>) -> LocateResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .ok_or(LocateError::InvalidDimensions { width, height })?;

        let mut sum = 0u64;
        let mut sum_sq = 0u64;
        for y in 0..height {
            let row = tpl
                .row(y)
                .ok_or(LocateError::InvalidInput("template row out of bounds"))?;
            for &value in row {
                let v = u64::from(value);
                sum += v;
                sum_sq += v * v;
            }
        }

        // n * Σt² - (Σt)² is exact in integers and zero only for flat templates.
        let n = count as u128;
        let spread = n * u128::from(sum_sq) - u128::from(sum) * u128::from(sum);
        let flat = spread == 0;

        let mean_f64 = sum as f64 / count as f64;
        let mean = mean_f64 as f32;
        let mut t_prime = Vec::with_capacity(count);
        let mut var_t = 0.0f64;
        for y in 0..height {
            let row = tpl
                .row(y)
                .ok_or(LocateError::InvalidInput("template row out of bounds"))?;
            for &value in row {
                let centered = f64::from(value) - mean_f64;
                var_t += centered * centered;
                t_prime.push(centered as f32);
            }
        }

        Ok(Self {
            width,
            height,
            mean,
            var_t: var_t as f32,
            flat,
            t_prime,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of template pixels.
    pub fn len(&self) -> usize {
        self.t_prime.len()
    }

    /// Always false; plans are built from non-empty views.
    pub fn is_empty(&self) -> bool {
        self.t_prime.is_empty()
    }

    /// Returns the mean intensity of the template.
    pub fn mean(&self) -> f32 {
        self.mean
    }

    /// Returns the template energy `Σ (t - mean)²`.
    pub fn var_t(&self) -> f32 {
        self.var_t
    }

    /// True when every template pixel has the same value.
    pub fn is_flat(&self) -> bool {
        self.flat
    }

    /// Returns the zero-mean template buffer in row-major order.
    pub fn t_prime(&self) -> &[f32] {
        &self.t_prime
    }
}
