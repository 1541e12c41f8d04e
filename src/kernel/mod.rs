//! Correlation kernel implementations.
//!
//! Kernels score a template plan against every top-left placement of an
//! image view. The score is zero-mean normalized cross-correlation in
//! `[-1, 1]`; placements where the correlation is undefined score `0.0`,
//! except that a flat template scores `1.0` against a flat window of the
//! same intensity.

use crate::candidate::topk::Peak;
use crate::search::ScoreMap;
use crate::template::TemplatePlan;
use crate::util::{LocateError, LocateResult};
use crate::ImageView;

/// Scan configuration for kernel evaluations.
#[derive(Clone, Copy, Debug)]
pub struct ScanParams {
    /// Maximum number of peaks to retain.
    pub topk: usize,
    /// Window variance at or below which the correlation is undefined.
    pub min_var_i: f32,
    /// Minimum score threshold (discard below this value).
    pub min_score: f32,
}

/// Kernel trait for scoring and scan operations.
pub trait Kernel {
    type Plan;

    /// Computes the score at a single placement (top-left coordinates).
    fn score_at(
        image: ImageView<'_, u8>,
        plan: &Self::Plan,
        x: usize,
        y: usize,
        min_var_i: f32,
    ) -> f32;

    /// Scans the full valid placement range and returns top-K peaks.
    fn scan_full(
        image: ImageView<'_, u8>,
        plan: &Self::Plan,
        params: ScanParams,
    ) -> LocateResult<Vec<Peak>>;

    /// Scores every valid placement into a dense map.
    fn score_map(
        image: ImageView<'_, u8>,
        plan: &Self::Plan,
        min_var_i: f32,
    ) -> LocateResult<ScoreMap>;
}

/// Returns the largest valid top-left placement `(max_x, max_y)`.
pub(crate) fn placement_bounds(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
) -> LocateResult<(usize, usize)> {
    let img_width = image.width();
    let img_height = image.height();
    let tpl_width = plan.width();
    let tpl_height = plan.height();
    if img_width < tpl_width || img_height < tpl_height {
        return Err(LocateError::TemplateTooLarge {
            tpl_width,
            tpl_height,
            img_width,
            img_height,
        });
    }
    Ok((img_width - tpl_width, img_height - tpl_height))
}

/// ZNCC of `plan` against the window whose top-left corner is `(x, y)`.
///
/// The caller guarantees the window lies inside the image.
#[inline]
pub(crate) fn zncc_window(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    x: usize,
    y: usize,
    min_var_i: f32,
) -> f32 {
    let tpl_width = plan.width();
    let t_prime = plan.t_prime();

    let mut dot = 0.0f64;
    let mut sum_i = 0u64;
    let mut sum_i2 = 0u64;
    for ty in 0..plan.height() {
        let Some(img_row) = image.row(y + ty) else {
            return 0.0;
        };
        let window = &img_row[x..x + tpl_width];
        let tpl_row = &t_prime[ty * tpl_width..(ty + 1) * tpl_width];

        let mut row_dot = 0.0f32;
        for (&value, &t) in window.iter().zip(tpl_row) {
            let v = u64::from(value);
            row_dot += t * value as f32;
            sum_i += v;
            sum_i2 += v * v;
        }
        dot += f64::from(row_dot);
    }

    let n = plan.len() as u128;
    let spread = n * u128::from(sum_i2) - u128::from(sum_i) * u128::from(sum_i);
    let var_i = spread as f64 / n as f64;

    if plan.is_flat() {
        let window_mean = sum_i as f64 / n as f64;
        let same_level = (window_mean - f64::from(plan.mean())).abs() < 0.5;
        return if spread == 0 && same_level { 1.0 } else { 0.0 };
    }
    if var_i <= f64::from(min_var_i) {
        return 0.0;
    }

    let score = dot / (f64::from(plan.var_t()) * var_i).sqrt();
    if score.is_finite() {
        score.clamp(-1.0, 1.0) as f32
    } else {
        0.0
    }
}

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;
