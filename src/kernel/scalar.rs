//! Scalar reference kernel for score evaluation.

use crate::candidate::topk::{Peak, TopK};
use crate::kernel::{placement_bounds, zncc_window, Kernel, ScanParams};
use crate::search::ScoreMap;
use crate::template::TemplatePlan;
use crate::util::LocateResult;
use crate::ImageView;

/// Scalar ZNCC kernel over all translations.
pub struct ZnccScalar;

impl Kernel for ZnccScalar {
    type Plan = TemplatePlan;

    fn score_at(
        image: ImageView<'_, u8>,
        plan: &Self::Plan,
        x: usize,
        y: usize,
        min_var_i: f32,
    ) -> f32 {
        match placement_bounds(image, plan) {
            Ok((max_x, max_y)) if x <= max_x && y <= max_y => {
                zncc_window(image, plan, x, y, min_var_i)
            }
            _ => f32::NEG_INFINITY,
        }
    }

    fn scan_full(
        image: ImageView<'_, u8>,
        plan: &Self::Plan,
        params: ScanParams,
    ) -> LocateResult<Vec<Peak>> {
        let (max_x, max_y) = placement_bounds(image, plan)?;
        if params.topk == 0 {
            return Ok(Vec::new());
        }

        let mut topk = TopK::new(params.topk);
        for y in 0..=max_y {
            for x in 0..=max_x {
                let score = zncc_window(image, plan, x, y, params.min_var_i);
                if score >= params.min_score {
                    topk.push(Peak { x, y, score });
                }
            }
        }
        Ok(topk.into_sorted_desc())
    }

    fn score_map(
        image: ImageView<'_, u8>,
        plan: &Self::Plan,
        min_var_i: f32,
    ) -> LocateResult<ScoreMap> {
        let (max_x, max_y) = placement_bounds(image, plan)?;
        let width = max_x + 1;
        let height = max_y + 1;
        let mut scores = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                scores.push(zncc_window(image, plan, x, y, min_var_i));
            }
        }
        ScoreMap::new(scores, width, height)
    }
}
