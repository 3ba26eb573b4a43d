use lexi_dom::Viewport;

/// Decides when the reader has reached the end of an article.
///
/// Fires once per activation; [`rearm`](Self::rearm) when immersive mode is switched on again.
#[derive(Debug, Clone)]
pub struct ArticleDetector {
    threshold: f64,
    fired: bool,
}

impl ArticleDetector {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            fired: false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// True exactly once, on the first scroll that reaches the threshold
    pub fn observe(&mut self, viewport: &Viewport) -> bool {
        if self.fired || viewport.scroll_progress() < self.threshold {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn rearm(&mut self) {
        self.fired = false;
    }
}
