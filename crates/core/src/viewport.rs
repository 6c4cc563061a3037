use std::time::{Duration, Instant};

const MIN_ROWS: usize = 1;

/// Converts a measured viewport height into the number of table rows per page.
///
/// `rows = floor((height * viewport_percent / 100 - chrome) / row_height)`,
/// never less than one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizing {
    pub viewport_percent: u32,
    pub chrome: u32,
    pub row_height: u32,
}

impl PageSizing {
    /// Browser layout: the grid takes 88% of the window, minus 108px of
    /// header and pager, with 52px rows.
    pub const PIXELS: Self = Self {
        viewport_percent: 88,
        chrome: 108,
        row_height: 52,
    };

    pub const fn cells(chrome: u32) -> Self {
        Self {
            viewport_percent: 100,
            chrome,
            row_height: 1,
        }
    }

    pub fn rows_for(&self, viewport_height: u32) -> usize {
        let scaled = u64::from(viewport_height) * u64::from(self.viewport_percent);
        let chrome = u64::from(self.chrome) * 100;
        if scaled <= chrome {
            return MIN_ROWS;
        }
        let row_height = u64::from(self.row_height.max(1)) * 100;
        let rows = ((scaled - chrome) / row_height) as usize;
        rows.max(MIN_ROWS)
    }
}

/// Coalesces bursts of resize events into one measurement.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    quiet: Duration,
    pending: Option<(u32, Instant)>,
}

impl ResizeDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn observe(&mut self, viewport_height: u32, at: Instant) {
        self.pending = Some((viewport_height, at));
    }

    /// The latest height once no resize has arrived for the quiet period.
    pub fn settle(&mut self, now: Instant) -> Option<u32> {
        match self.pending {
            Some((height, at)) if now.saturating_duration_since(at) >= self.quiet => {
                self.pending = None;
                Some(height)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1000, 14)]
    #[case(800, 11)]
    #[case(1440, 22)]
    #[case(150, 1)]
    #[case(0, 1)]
    fn pixel_sizing_matches_browser_formula(#[case] height: u32, #[case] rows: usize) {
        assert_eq!(PageSizing::PIXELS.rows_for(height), rows);
    }

    #[test]
    fn cell_sizing_subtracts_chrome() {
        let sizing = PageSizing::cells(9);
        assert_eq!(sizing.rows_for(40), 31);
        assert_eq!(sizing.rows_for(9), 1);
    }

    #[test]
    fn debouncer_waits_for_quiet_period() {
        let start = Instant::now();
        let quiet = Duration::from_millis(100);
        let mut debouncer = ResizeDebouncer::new(quiet);

        debouncer.observe(30, start);
        debouncer.observe(32, start + Duration::from_millis(40));
        assert_eq!(debouncer.settle(start + Duration::from_millis(90)), None);
        assert_eq!(debouncer.settle(start + Duration::from_millis(140)), Some(32));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.settle(start + Duration::from_millis(500)), None);
    }
}
