//! Edge Auto-Scroll
//!
//! Scrolls the window while a drag hovers near the top or bottom edge.
//! The state machine only decides *when* to scroll; the actual timer comes
//! from a [`ScrollTicker`], whose handle stops ticking when dropped.

use gloo_timers::callback::Interval;

/// Distance from a viewport edge that triggers scrolling
pub const DEFAULT_EDGE_THRESHOLD_PX: f64 = 100.0;
/// Tick period (~60fps)
pub const DEFAULT_TICK_MS: u32 = 16;
/// Pixels scrolled per tick
pub const DEFAULT_STEP_PX: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    fn sign(self) -> f64 {
        match self {
            ScrollDirection::Up => -1.0,
            ScrollDirection::Down => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AutoScrollState {
    #[default]
    Idle,
    Scrolling(ScrollDirection),
}

/// Classify a pointer position against the viewport edges.
pub fn classify(pointer_y: f64, viewport_height: f64, threshold: f64) -> AutoScrollState {
    if pointer_y < threshold {
        AutoScrollState::Scrolling(ScrollDirection::Up)
    } else if pointer_y > viewport_height - threshold {
        AutoScrollState::Scrolling(ScrollDirection::Down)
    } else {
        AutoScrollState::Idle
    }
}

/// Source of repeating scroll ticks.
pub trait ScrollTicker {
    /// Dropping the handle must stop the ticks.
    type Handle;

    fn start(&mut self, direction: ScrollDirection) -> Self::Handle;
}

/// Ticker backed by `setInterval` + `window.scrollBy`.
#[derive(Clone, Copy, Debug)]
pub struct WindowTicker {
    pub tick_ms: u32,
    pub step_px: f64,
}

impl Default for WindowTicker {
    fn default() -> Self {
        Self { tick_ms: DEFAULT_TICK_MS, step_px: DEFAULT_STEP_PX }
    }
}

impl ScrollTicker for WindowTicker {
    type Handle = Interval;

    fn start(&mut self, direction: ScrollDirection) -> Interval {
        let dy = direction.sign() * self.step_px;
        Interval::new(self.tick_ms, move || {
            if let Some(win) = web_sys::window() {
                win.scroll_by_with_x_and_y(0.0, dy);
            }
        })
    }
}

/// Current viewport height, if a window exists.
pub fn viewport_height() -> Option<f64> {
    web_sys::window()
        .and_then(|win| win.inner_height().ok())
        .and_then(|h| h.as_f64())
}

/// Auto-scroll monitor. Holds at most one live ticker handle.
pub struct AutoScroller<T: ScrollTicker> {
    state: AutoScrollState,
    threshold: f64,
    ticker: T,
    handle: Option<T::Handle>,
}

impl<T: ScrollTicker> AutoScroller<T> {
    pub fn new(ticker: T, threshold: f64) -> Self {
        Self { state: AutoScrollState::Idle, threshold, ticker, handle: None }
    }

    pub fn state(&self) -> AutoScrollState {
        self.state
    }

    pub fn is_scrolling(&self) -> bool {
        self.handle.is_some()
    }

    /// Feed a pointer position. Starts, switches, or stops the ticker when
    /// the edge zone changes.
    pub fn update(&mut self, pointer_y: f64, viewport_height: f64) -> AutoScrollState {
        let next = classify(pointer_y, viewport_height, self.threshold);
        if next == self.state {
            return next;
        }
        // Old interval goes away before a new one exists
        self.handle = None;
        if let AutoScrollState::Scrolling(direction) = next {
            self.handle = Some(self.ticker.start(direction));
        }
        self.state = next;
        next
    }

    /// Window-level feed: scrolls only while a drag is in progress, and
    /// tears down any running ticker otherwise.
    pub fn track(&mut self, dragging: bool, pointer_y: f64, viewport_height: f64) -> AutoScrollState {
        if !dragging {
            self.stop();
            return self.state;
        }
        self.update(pointer_y, viewport_height)
    }

    /// Unconditional teardown.
    pub fn stop(&mut self) {
        self.handle = None;
        self.state = AutoScrollState::Idle;
    }
}

impl AutoScroller<WindowTicker> {
    pub fn for_window(tick_ms: u32, step_px: f64, threshold: f64) -> Self {
        Self::new(WindowTicker { tick_ms, step_px }, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Ticker that counts live handles instead of touching a window.
    #[derive(Default, Clone)]
    struct CountingTicker {
        live: Rc<Cell<usize>>,
        max_live: Rc<Cell<usize>>,
        started: Rc<Cell<usize>>,
        last_direction: Rc<Cell<Option<ScrollDirection>>>,
    }

    struct Guard(Rc<Cell<usize>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    impl ScrollTicker for CountingTicker {
        type Handle = Guard;

        fn start(&mut self, direction: ScrollDirection) -> Guard {
            self.live.set(self.live.get() + 1);
            self.max_live.set(self.max_live.get().max(self.live.get()));
            self.started.set(self.started.get() + 1);
            self.last_direction.set(Some(direction));
            Guard(self.live.clone())
        }
    }

    const VIEWPORT: f64 = 800.0;

    #[test]
    fn test_classify_zones() {
        assert_eq!(classify(5.0, VIEWPORT, 100.0), AutoScrollState::Scrolling(ScrollDirection::Up));
        assert_eq!(classify(400.0, VIEWPORT, 100.0), AutoScrollState::Idle);
        assert_eq!(classify(750.0, VIEWPORT, 100.0), AutoScrollState::Scrolling(ScrollDirection::Down));
    }

    #[test]
    fn test_top_edge_starts_upward_scroll_and_center_stops_it() {
        let ticker = CountingTicker::default();
        let mut scroller = AutoScroller::new(ticker.clone(), DEFAULT_EDGE_THRESHOLD_PX);

        scroller.update(5.0, VIEWPORT);
        assert!(scroller.is_scrolling());
        assert_eq!(ticker.last_direction.get(), Some(ScrollDirection::Up));
        assert_eq!(ticker.live.get(), 1);

        scroller.update(VIEWPORT / 2.0, VIEWPORT);
        assert!(!scroller.is_scrolling());
        assert_eq!(scroller.state(), AutoScrollState::Idle);
        assert_eq!(ticker.live.get(), 0);
    }

    #[test]
    fn test_never_more_than_one_interval() {
        let ticker = CountingTicker::default();
        let mut scroller = AutoScroller::new(ticker.clone(), DEFAULT_EDGE_THRESHOLD_PX);

        for y in [5.0, 10.0, 790.0, 400.0, 2.0, 799.0, 1.0, 795.0] {
            scroller.update(y, VIEWPORT);
            assert!(ticker.live.get() <= 1);
        }
        assert_eq!(ticker.max_live.get(), 1);
        // Staying inside one zone does not restart the interval
        assert_eq!(ticker.started.get(), 6);
    }

    #[test]
    fn test_stop_is_unconditional() {
        let ticker = CountingTicker::default();
        let mut scroller = AutoScroller::new(ticker.clone(), DEFAULT_EDGE_THRESHOLD_PX);

        scroller.stop();
        assert_eq!(ticker.live.get(), 0);

        scroller.update(790.0, VIEWPORT);
        scroller.stop();
        assert_eq!(ticker.live.get(), 0);
        assert_eq!(scroller.state(), AutoScrollState::Idle);

        // A fresh edge visit after stop starts again
        scroller.update(790.0, VIEWPORT);
        assert_eq!(ticker.live.get(), 1);
    }

    #[test]
    fn test_pointer_outside_columns_still_leaves_edge() {
        let ticker = CountingTicker::default();
        let mut scroller = AutoScroller::new(ticker.clone(), DEFAULT_EDGE_THRESHOLD_PX);

        // Entered the bottom edge over a column
        scroller.update(790.0, VIEWPORT);
        assert!(scroller.is_scrolling());

        // Later positions come from the window, past the last column
        scroller.track(true, VIEWPORT / 2.0, VIEWPORT);
        assert!(!scroller.is_scrolling());
        assert_eq!(ticker.live.get(), 0);
    }

    #[test]
    fn test_track_without_drag_never_scrolls() {
        let ticker = CountingTicker::default();
        let mut scroller = AutoScroller::new(ticker.clone(), DEFAULT_EDGE_THRESHOLD_PX);

        assert_eq!(scroller.track(false, 5.0, VIEWPORT), AutoScrollState::Idle);
        assert_eq!(ticker.started.get(), 0);

        scroller.track(true, 5.0, VIEWPORT);
        assert_eq!(ticker.live.get(), 1);
        scroller.track(false, 5.0, VIEWPORT);
        assert_eq!(ticker.live.get(), 0);
    }
}
