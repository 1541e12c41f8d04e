//! Template location over all translations.
//!
//! `Locator` scores a template at every placement inside an image, picks the
//! highest ZNCC score and accepts it when it reaches the confidence
//! threshold. The computation is pure: no files, no display.

pub(crate) mod scan;

pub use scan::{MinMaxLoc, ScoreMap};

use crate::candidate::nms::nms_2d;
use crate::candidate::topk::Peak;
use crate::kernel::scalar::ZnccScalar;
use crate::kernel::{Kernel, ScanParams};
use crate::template::{Template, TemplatePlan};
use crate::trace::{trace_event, trace_info, trace_span};
use crate::util::{LocateError, LocateResult};
use crate::ImageView;

/// Default minimum score for accepting a match.
pub const DEFAULT_THRESHOLD: f32 = 0.8;

/// Configuration for [`Locator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocateConfig {
    /// Minimum ZNCC score for a placement to count as found.
    pub threshold: f32,
    /// Window variance at or below which the correlation is undefined.
    pub min_var_i: f32,
    /// Scan rows in parallel when the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_var_i: 1e-6,
            parallel: false,
        }
    }
}

impl LocateConfig {
    fn validate(&self) -> LocateResult<()> {
        if !self.threshold.is_finite() || !(-1.0..=1.0).contains(&self.threshold) {
            return Err(LocateError::InvalidInput("threshold must lie in [-1, 1]"));
        }
        if !self.min_var_i.is_finite() || self.min_var_i < 0.0 {
            return Err(LocateError::InvalidInput(
                "min_var_i must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Accepted template placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    /// Left edge of the match.
    pub x: u32,
    /// Top edge of the match.
    pub y: u32,
    /// Template width.
    pub width: u32,
    /// Template height.
    pub height: u32,
    /// ZNCC score at the placement.
    pub confidence: f32,
}

impl MatchResult {
    fn from_peak(peak: Peak, plan: &TemplatePlan) -> Self {
        Self {
            x: peak.x as u32,
            y: peak.y as u32,
            width: plan.width() as u32,
            height: plan.height() as u32,
            confidence: peak.score,
        }
    }

    /// Bounding box as `(x, y, width, height)`.
    pub fn bbox(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }
}

/// ZNCC template locator.
#[derive(Clone, Debug, Default)]
pub struct Locator {
    cfg: LocateConfig,
}

impl Locator {
    /// Creates a locator with the given configuration.
    pub fn new(cfg: LocateConfig) -> Self {
        Self { cfg }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: LocateConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &LocateConfig {
        &self.cfg
    }

    /// Scores every placement of `template` in `image`.
    pub fn score_map(
        &self,
        image: ImageView<'_, u8>,
        template: &Template,
    ) -> LocateResult<ScoreMap> {
        self.cfg.validate()?;
        let plan = template.plan()?;
        let _span = trace_span!(
            "score_map",
            width = image.width(),
            height = image.height(),
            tpl_width = plan.width(),
            tpl_height = plan.height()
        )
        .entered();
        self.dense(image, &plan)
    }

    /// Highest-scoring placement regardless of the threshold.
    pub fn best(&self, image: ImageView<'_, u8>, template: &Template) -> LocateResult<Peak> {
        self.cfg.validate()?;
        let plan = template.plan()?;
        self.best_with_plan(image, &plan)
    }

    /// Best placement if its score reaches the threshold.
    pub fn locate(
        &self,
        image: ImageView<'_, u8>,
        template: &Template,
    ) -> LocateResult<Option<MatchResult>> {
        self.cfg.validate()?;
        let plan = template.plan()?;
        let _span = trace_span!(
            "locate",
            width = image.width(),
            height = image.height(),
            tpl_width = plan.width(),
            tpl_height = plan.height()
        )
        .entered();

        let best = self.best_with_plan(image, &plan)?;
        trace_event!("best_peak", x = best.x, y = best.y, score = best.score);
        if best.score < self.cfg.threshold {
            trace_info!(
                "template not found with sufficient confidence (max confidence: {:.2})",
                best.score
            );
            return Ok(None);
        }
        Ok(Some(MatchResult::from_peak(best, &plan)))
    }

    /// Every separated placement scoring at least the threshold.
    ///
    /// Placements within `nms_radius` (Chebyshev distance) of a stronger one
    /// are suppressed; at most `max_matches` results are returned, strongest
    /// first.
    pub fn locate_all(
        &self,
        image: ImageView<'_, u8>,
        template: &Template,
        max_matches: usize,
        nms_radius: usize,
    ) -> LocateResult<Vec<MatchResult>> {
        self.cfg.validate()?;
        let plan = template.plan()?;
        let _span = trace_span!("locate_all", max_matches = max_matches).entered();
        if max_matches == 0 {
            return Ok(Vec::new());
        }

        let map = self.dense(image, &plan)?;
        let mut peaks: Vec<Peak> = map
            .above(self.cfg.threshold)
            .map(|(x, y, score)| Peak { x, y, score })
            .collect();
        let mut kept = nms_2d(&mut peaks, nms_radius);
        kept.truncate(max_matches);
        trace_event!("matches", count = kept.len());

        Ok(kept
            .into_iter()
            .map(|peak| MatchResult::from_peak(peak, &plan))
            .collect())
    }

    fn params(&self, topk: usize) -> ScanParams {
        ScanParams {
            topk,
            min_var_i: self.cfg.min_var_i,
            min_score: f32::NEG_INFINITY,
        }
    }

    fn best_with_plan(
        &self,
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
    ) -> LocateResult<Peak> {
        let peaks = if self.use_parallel() {
            self.scan_parallel(image, plan)?
        } else {
            ZnccScalar::scan_full(image, plan, self.params(1))?
        };
        peaks
            .into_iter()
            .next()
            .ok_or(LocateError::InvalidInput("no valid template placement"))
    }

    fn dense(&self, image: ImageView<'_, u8>, plan: &TemplatePlan) -> LocateResult<ScoreMap> {
        if self.use_parallel() {
            self.dense_parallel(image, plan)
        } else {
            ZnccScalar::score_map(image, plan, self.cfg.min_var_i)
        }
    }

    fn use_parallel(&self) -> bool {
        self.cfg.parallel && cfg!(feature = "rayon")
    }

    #[cfg(feature = "rayon")]
    fn scan_parallel(
        &self,
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
    ) -> LocateResult<Vec<Peak>> {
        crate::kernel::rayon::zncc_scan_full_par(image, plan, self.params(1))
    }

    #[cfg(not(feature = "rayon"))]
    fn scan_parallel(
        &self,
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
    ) -> LocateResult<Vec<Peak>> {
        ZnccScalar::scan_full(image, plan, self.params(1))
    }

    #[cfg(feature = "rayon")]
    fn dense_parallel(
        &self,
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
    ) -> LocateResult<ScoreMap> {
        crate::kernel::rayon::zncc_score_map_par(image, plan, self.cfg.min_var_i)
    }

    #[cfg(not(feature = "rayon"))]
    fn dense_parallel(
        &self,
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
    ) -> LocateResult<ScoreMap> {
        ZnccScalar::score_map(image, plan, self.cfg.min_var_i)
    }
}
