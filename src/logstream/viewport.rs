//! Scroll position over the live log.

/// Top-anchored window of `height` lines over a buffer.
///
/// `offset` is the index of the first visible line. The log panel sets the
/// height every frame. While `follow` is set, appends keep the last line in
/// view; any upward scroll clears it and End or scrolling back down to the
/// last line sets it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    height: usize,
    follow: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            offset: 0,
            height,
            follow: true,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether new lines pull the view down.
    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Set the visible height, keeping a following view at the bottom.
    pub fn set_height(&mut self, height: usize, len: usize) {
        self.height = height;
        if self.follow {
            self.scroll_to_bottom(len);
        } else {
            self.clamp(len);
        }
    }

    fn max_offset(&self, len: usize) -> usize {
        len.saturating_sub(self.height)
    }

    /// True when the last line is visible.
    pub fn is_at_bottom(&self, len: usize) -> bool {
        self.offset >= self.max_offset(len)
    }

    /// Back to the top of a fresh buffer, following.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.follow = true;
    }

    pub fn scroll_to_bottom(&mut self, len: usize) {
        self.offset = self.max_offset(len);
        self.follow = true;
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_up(self.offset);
    }

    /// Moving up stops following; a no-op at the top does not.
    pub fn scroll_up(&mut self, lines: usize) {
        let offset = self.offset.saturating_sub(lines);
        if offset < self.offset {
            self.offset = offset;
            self.follow = false;
        }
    }

    pub fn scroll_down(&mut self, lines: usize, len: usize) {
        self.offset = (self.offset + lines).min(self.max_offset(len));
        if self.is_at_bottom(len) {
            self.follow = true;
        }
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.height.max(1));
    }

    pub fn page_down(&mut self, len: usize) {
        self.scroll_down(self.height.max(1), len);
    }

    /// Keep the same lines on screen after `count` lines were evicted from
    /// the front of the buffer.
    pub fn shift_for_eviction(&mut self, count: usize) {
        self.offset = self.offset.saturating_sub(count);
    }

    fn clamp(&mut self, len: usize) {
        self.offset = self.offset.min(self.max_offset(len));
    }

    /// Index range of the visible lines.
    pub fn visible_range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        let end = (start + self.height).min(len);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom_is_exact() {
        let mut viewport = Viewport::new(10);
        viewport.scroll_to_bottom(30);
        assert_eq!(viewport.offset(), 20);
        assert!(viewport.is_at_bottom(30));
        assert!(!viewport.is_at_bottom(31));
    }

    #[test]
    fn test_single_line_up_stops_following() {
        let mut viewport = Viewport::new(5);
        viewport.scroll_to_bottom(21);
        assert!(viewport.is_following());

        viewport.scroll_up(1);
        assert_eq!(viewport.offset(), 15);
        assert!(!viewport.is_following());

        // Back down to the last line follows again
        viewport.scroll_down(1, 21);
        assert_eq!(viewport.offset(), 16);
        assert!(viewport.is_following());
    }

    #[test]
    fn test_up_at_top_keeps_following() {
        let mut viewport = Viewport::new(10);
        viewport.scroll_up(1);
        viewport.scroll_to_top();
        assert!(viewport.is_following());
    }

    #[test]
    fn test_short_buffer_is_at_bottom() {
        let viewport = Viewport::new(10);
        assert!(viewport.is_at_bottom(3));
        assert_eq!(viewport.visible_range(3), 0..3);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut viewport = Viewport::new(5);
        viewport.scroll_down(100, 12);
        assert_eq!(viewport.offset(), 7);
        viewport.page_up();
        assert_eq!(viewport.offset(), 2);
        viewport.scroll_up(10);
        assert_eq!(viewport.offset(), 0);
        assert!(!viewport.is_following());
    }

    #[test]
    fn test_shift_for_eviction() {
        let mut viewport = Viewport::new(5);
        viewport.scroll_down(4, 20);
        viewport.shift_for_eviction(1);
        assert_eq!(viewport.offset(), 3);
        viewport.shift_for_eviction(10);
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn test_set_height_keeps_following() {
        let mut viewport = Viewport::new(5);
        viewport.scroll_to_bottom(20);
        viewport.set_height(8, 20);
        assert_eq!(viewport.offset(), 12);
    }
}
