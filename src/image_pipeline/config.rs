/// Knobs controlling the image pipeline (§4.3) and which refinement stages
/// (§4.4) run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Lower bound on panel width or height as a fraction of the image.
    pub min_panel_ratio: f64,
    /// Lower bound on segment length as a fraction of `min(W, H)`.
    /// Defaults to `min_panel_ratio / 2`.
    pub min_segment_ratio: f64,
    /// Apply a 3x3 Gaussian blur before edge detection.
    pub use_denoising: bool,
    /// Use Canny instead of (weighted) Sobel for edge extraction.
    pub use_canny: bool,
    /// Bridge small gaps in the edge image with a 3x3 morphological close.
    pub use_morphological_close: bool,
    /// Cap on line-segment-detector output; keeps the highest-scoring segments.
    pub max_segments: usize,
    /// Multiply segment score by `1 + axis_alignment` when true.
    pub prefer_axis_aligned: bool,
    /// Include a line-quality bonus in segment scoring, when available.
    /// Inert under the current Hough-based `lines::detect_segments`: LSD's
    /// number-of-false-alarms score has no equivalent in
    /// `imageproc::hough`, so there is nothing to gate yet.
    pub use_lsd_nfa: bool,
    /// Run the polygon-based panel split pass.
    pub panel_splitting: bool,
    /// Run small-panel grouping.
    pub small_panel_grouping: bool,
    /// Run big-panel grouping.
    pub big_panel_grouping: bool,
    /// Run neighbor-aware panel expansion.
    pub panel_expansion: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let min_panel_ratio = 0.02;
        Self {
            min_panel_ratio,
            min_segment_ratio: min_panel_ratio / 2.0,
            use_denoising: true,
            use_canny: false,
            use_morphological_close: true,
            max_segments: 400,
            prefer_axis_aligned: true,
            use_lsd_nfa: false,
            panel_splitting: true,
            small_panel_grouping: true,
            big_panel_grouping: true,
            panel_expansion: true,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.min_panel_ratio <= 0.0 || self.min_panel_ratio >= 1.0 {
            return Err(crate::error::Error::InvalidConfig(format!(
                "min_panel_ratio must be in (0, 1), got {}",
                self.min_panel_ratio
            )));
        }
        if self.min_segment_ratio <= 0.0 {
            return Err(crate::error::Error::InvalidConfig(format!(
                "min_segment_ratio must be positive, got {}",
                self.min_segment_ratio
            )));
        }
        Ok(())
    }
}
