//! Message overlay that appears when the camera zooms in close.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayChange {
    Shown,
    Hidden,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoomOverlay {
    message: String,
    threshold: f32,
    visible: bool,
}

impl ZoomOverlay {
    pub const DEFAULT_MESSAGE: &'static str = "Happy Birthday!";
    pub const DEFAULT_THRESHOLD: f32 = 1.0;

    pub fn new(message: impl Into<String>, threshold: f32) -> Self {
        Self {
            message: message.into(),
            threshold,
            visible: false,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_zoom_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    /// Feed the current camera distance. Returns a change only when the
    /// visibility flips.
    pub fn update_zoom_level(&mut self, distance: f32) -> Option<OverlayChange> {
        let should_show = distance < self.threshold;
        if should_show == self.visible {
            return None;
        }
        self.visible = should_show;
        Some(if should_show {
            OverlayChange::Shown
        } else {
            OverlayChange::Hidden
        })
    }
}

impl Default for ZoomOverlay {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MESSAGE, Self::DEFAULT_THRESHOLD)
    }
}
