//! Scroll progress derivation for the decorative header.
//!
//! Recomputed from scratch on every scroll or resize; nothing accumulates.

/// Progress fraction and rotation derived from one scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Fraction of the scrollable height traversed, in `[0, 1]`
    pub progress: f64,
}

impl ScrollState {
    /// Derive the state for `offset` within a document of `document_height`
    /// shown through a viewport of `viewport_height` (any consistent unit).
    #[must_use]
    pub fn derive(offset: f64, document_height: f64, viewport_height: f64) -> Self {
        let scrollable = document_height - viewport_height;
        let progress = if scrollable <= 0.0 || !scrollable.is_finite() {
            0.0
        } else {
            (offset / scrollable).clamp(0.0, 1.0)
        };

        // NaN offsets survive `clamp`.
        let progress = if progress.is_nan() { 0.0 } else { progress };

        Self { progress }
    }

    /// Unwrapped sweep `progress * 360`, in `[0, 360]`.
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.progress * 360.0
    }

    /// Rotation angle normalised into `[0, 360)`.
    #[must_use]
    pub fn rotation_angle(&self) -> f64 {
        self.rotation_degrees().rem_euclid(360.0)
    }

    /// Index of the animation frame for a ring of `frames` glyphs.
    #[must_use]
    pub fn rotation_frame(&self, frames: usize) -> usize {
        if frames == 0 {
            return 0;
        }
        let step = 360.0 / frames as f64;
        ((self.rotation_angle() / step) as usize).min(frames - 1)
    }
}

/// Scroll position of a line-based page, clamped to its scrollable range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollPosition {
    offset: u16,
    document_height: u16,
    viewport_height: u16,
}

impl ScrollPosition {
    /// Current top line.
    #[must_use]
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Largest valid offset.
    #[must_use]
    pub fn max_offset(&self) -> u16 {
        self.document_height.saturating_sub(self.viewport_height)
    }

    /// Record new page dimensions and re-clamp the offset.
    pub fn resize(&mut self, document_height: u16, viewport_height: u16) {
        self.document_height = document_height;
        self.viewport_height = viewport_height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scroll by `delta` lines (negative scrolls up).
    pub fn scroll_by(&mut self, delta: i32) {
        let target = (i32::from(self.offset) + delta).clamp(0, i32::from(self.max_offset()));
        self.offset = target as u16;
    }

    /// Jump to `line`, clamped to the scrollable range.
    pub fn scroll_to(&mut self, line: u16) {
        self.offset = line.min(self.max_offset());
    }

    /// Derived progress state for the current position.
    #[must_use]
    pub fn state(&self) -> ScrollState {
        ScrollState::derive(
            f64::from(self.offset),
            f64::from(self.document_height),
            f64::from(self.viewport_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_of_page() {
        let state = ScrollState::derive(0.0, 2000.0, 800.0);
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.rotation_angle(), 0.0);
    }

    #[test]
    fn test_bottom_of_page() {
        let state = ScrollState::derive(1200.0, 2000.0, 800.0);
        assert_eq!(state.progress, 1.0);
        assert_eq!(state.rotation_degrees(), 360.0);
        assert_eq!(state.rotation_angle(), 0.0);
    }

    #[test]
    fn test_no_scrollable_height() {
        assert_eq!(ScrollState::derive(0.0, 800.0, 800.0).progress, 0.0);
        assert_eq!(ScrollState::derive(50.0, 600.0, 800.0).progress, 0.0);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(ScrollState::derive(-10.0, 2000.0, 800.0).progress, 0.0);
        assert_eq!(ScrollState::derive(5000.0, 2000.0, 800.0).progress, 1.0);
        assert_eq!(ScrollState::derive(f64::NAN, 2000.0, 800.0).progress, 0.0);
    }

    #[test]
    fn test_monotonic_in_offset() {
        let mut last = ScrollState::derive(0.0, 2000.0, 800.0);
        for offset in (0..=1300).step_by(7) {
            let next = ScrollState::derive(f64::from(offset), 2000.0, 800.0);
            assert!(next.progress >= last.progress);
            assert!(next.rotation_degrees() >= last.rotation_degrees());
            assert!((0.0..360.0).contains(&next.rotation_angle()));
            last = next;
        }
    }

    #[test]
    fn test_halfway() {
        let state = ScrollState::derive(600.0, 2000.0, 800.0);
        assert!((state.progress - 0.5).abs() < f64::EPSILON);
        assert!((state.rotation_angle() - 180.0).abs() < 1e-9);
        assert_eq!(state.rotation_frame(8), 4);
    }

    #[test]
    fn test_position_clamps_on_resize() {
        let mut pos = ScrollPosition::default();
        pos.resize(100, 20);
        pos.scroll_by(500);
        assert_eq!(pos.offset(), 80);
        assert_eq!(pos.state().progress, 1.0);

        pos.resize(50, 20);
        assert_eq!(pos.offset(), 30);

        pos.scroll_by(-100);
        assert_eq!(pos.offset(), 0);

        pos.scroll_to(10);
        assert_eq!(pos.offset(), 10);
    }
}
