//! Rayon-parallel scans (feature-gated).
//!
//! Rows of placements are scored in parallel; each row uses the same window
//! scoring as the scalar kernel, so results are identical to a sequential scan.

use crate::candidate::topk::{Peak, TopK};
use crate::kernel::{placement_bounds, zncc_window, ScanParams};
use crate::search::ScoreMap;
use crate::template::TemplatePlan;
use crate::util::LocateResult;
use crate::ImageView;
use rayon::prelude::*;

/// Row-parallel full scan returning the top-K peaks.
pub fn zncc_scan_full_par(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    params: ScanParams,
) -> LocateResult<Vec<Peak>> {
    let (max_x, max_y) = placement_bounds(image, plan)?;
    if params.topk == 0 {
        return Ok(Vec::new());
    }

    let row_results: Vec<Vec<Peak>> = (0..=max_y)
        .into_par_iter()
        .map(|y| {
            let mut row_topk = TopK::new(params.topk);
            for x in 0..=max_x {
                let score = zncc_window(image, plan, x, y, params.min_var_i);
                if score >= params.min_score {
                    row_topk.push(Peak { x, y, score });
                }
            }
            row_topk.into_sorted_desc()
        })
        .collect();

    // Merge per-row results and select top-k
    let mut topk = TopK::new(params.topk);
    for peaks in row_results {
        topk.extend(peaks);
    }
    Ok(topk.into_sorted_desc())
}

/// Row-parallel dense score map.
pub fn zncc_score_map_par(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    min_var_i: f32,
) -> LocateResult<ScoreMap> {
    let (max_x, max_y) = placement_bounds(image, plan)?;
    let width = max_x + 1;
    let height = max_y + 1;
    let mut scores = vec![0.0f32; width * height];
    scores
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = zncc_window(image, plan, x, y, min_var_i);
            }
        });
    ScoreMap::new(scores, width, height)
}
