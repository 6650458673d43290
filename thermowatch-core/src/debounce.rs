//! Debounced button edge detection
//!
//! Two phases guard one physical press against producing several threshold
//! changes:
//!
//! 1. Interrupt context ([`EdgeLatch::on_falling_edge`]): a falling edge is
//!    accepted only if more than the debounce window has passed since the
//!    last accepted edge. Accepting raises the pending flag. Nothing else
//!    happens in the handler.
//! 2. Main loop ([`EdgeDetector::poll`]): a pending edge is re-checked after
//!    a short settle delay. A line that is still asserted confirms the press
//!    and advances the threshold; a line that bounced back is noise. A
//!    confirmed press stays latched until the line is seen released.
//!
//! The button is wired active-low with a pull-up, so "asserted" means the
//! input reads low.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};
use thermowatch_hal::InputPin;

use crate::clock::{elapsed, Ticks};
use crate::delay::BlockingDelay;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum spacing between accepted raw edges in the reference design
pub const DEFAULT_DEBOUNCE_WINDOW_MS: u32 = 200;

/// Settle time before re-reading the line in the reference design
pub const DEFAULT_SETTLE_MS: u32 = 10;

/// Number of selectable thresholds
pub const THRESHOLD_COUNT: usize = 3;

/// Reference threshold table (°C)
pub const DEFAULT_THRESHOLDS_C: [f32; THRESHOLD_COUNT] = [25.0, 30.0, 35.0];

/// Debounce timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DebounceConfig {
    /// Edges closer together than this are dropped in the interrupt
    pub window_ms: u32,
    /// Delay before the main loop re-reads the line
    pub settle_ms: u32,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_DEBOUNCE_WINDOW_MS,
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

/// Interrupt-side half of the detector
///
/// `pending` is raised by the edge interrupt and cleared by the main loop.
/// `last_trigger` is written only by the edge interrupt.
pub struct EdgeLatch {
    pending: AtomicBool,
    last_trigger: AtomicU32,
    window_ms: u32,
}

impl EdgeLatch {
    /// Create an idle latch
    pub const fn new(window_ms: u32) -> Self {
        Self {
            pending: AtomicBool::new(false),
            last_trigger: AtomicU32::new(0),
            window_ms,
        }
    }

    /// Record a falling edge seen at `now`
    ///
    /// Interrupt context; never blocks. Returns true if the edge was
    /// accepted.
    pub fn on_falling_edge(&self, now: Ticks) -> bool {
        let last = self.last_trigger.load(Ordering::Acquire);
        if elapsed(now, last) > self.window_ms {
            self.last_trigger.store(now, Ordering::Release);
            self.pending.store(true, Ordering::Release);
            true
        } else {
            false
        }
    }

    /// Whether an accepted edge awaits the main loop
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Timestamp of the last accepted edge
    pub fn last_trigger(&self) -> Ticks {
        self.last_trigger.load(Ordering::Acquire)
    }

    /// Drop the pending edge (main loop only)
    pub fn clear(&self) {
        self.pending.store(false, Ordering::Release);
    }
}

/// Cyclic index into the threshold table
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdSelector {
    values: [f32; THRESHOLD_COUNT],
    index: usize,
}

impl ThresholdSelector {
    /// Create a selector; an out-of-range `index` wraps into the table
    pub fn new(values: [f32; THRESHOLD_COUNT], index: usize) -> Self {
        Self {
            values,
            index: index % THRESHOLD_COUNT,
        }
    }

    /// Active threshold (°C)
    pub fn current(&self) -> f32 {
        self.values[self.index]
    }

    /// Active table index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Threshold table
    pub fn values(&self) -> &[f32; THRESHOLD_COUNT] {
        &self.values
    }

    /// Step to the next threshold, wrapping from last to first
    fn advance(&mut self) -> f32 {
        self.index = (self.index + 1) % THRESHOLD_COUNT;
        self.current()
    }
}

impl Default for ThresholdSelector {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLDS_C, 1)
    }
}

/// Result of one main-loop debounce pass
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonOutcome {
    /// Nothing pending
    Idle,
    /// Press confirmed; the selector moved to `threshold_c`
    Confirmed { index: usize, threshold_c: f32 },
    /// The line had bounced back by the end of the settle delay
    Rejected,
    /// A confirmed press is still held down
    Held,
    /// The held press was released; the detector is re-armed
    Released,
}

/// Main-loop half of the detector
#[derive(Debug, Clone)]
pub struct EdgeDetector {
    settle_ms: u32,
    confirmed: bool,
}

impl EdgeDetector {
    /// Create an armed detector
    pub const fn new(settle_ms: u32) -> Self {
        Self {
            settle_ms,
            confirmed: false,
        }
    }

    /// Whether a confirmed press is waiting for release
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Run one confirmation/release pass
    ///
    /// Only blocks for the settle delay, and only when a new edge is
    /// pending. This is the only place the selector is advanced.
    pub fn poll<B, D>(
        &mut self,
        latch: &EdgeLatch,
        line: &B,
        delay: &mut D,
        selector: &mut ThresholdSelector,
    ) -> ButtonOutcome
    where
        B: InputPin,
        D: BlockingDelay,
    {
        if self.confirmed {
            if line.is_high() {
                latch.clear();
                self.confirmed = false;
                return ButtonOutcome::Released;
            }
            return ButtonOutcome::Held;
        }

        if !latch.is_pending() {
            return ButtonOutcome::Idle;
        }

        delay.delay_ms(self.settle_ms);

        if line.is_low() {
            let threshold_c = selector.advance();
            self.confirmed = true;
            ButtonOutcome::Confirmed {
                index: selector.index(),
                threshold_c,
            }
        } else {
            latch.clear();
            ButtonOutcome::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TickClock;
    use crate::testing::{ScriptedLine, SimDelay};

    const WINDOW: u32 = DEFAULT_DEBOUNCE_WINDOW_MS;
    const SETTLE: u32 = DEFAULT_SETTLE_MS;

    struct Rig {
        clock: TickClock,
        latch: EdgeLatch,
        line: ScriptedLine,
        detector: EdgeDetector,
        selector: ThresholdSelector,
    }

    impl Rig {
        fn new() -> Self {
            let clock = TickClock::new();
            // Well clear of boot so the first edge is outside the window
            clock.preset(10_000);
            Self {
                clock,
                latch: EdgeLatch::new(WINDOW),
                line: ScriptedLine::released(),
                detector: EdgeDetector::new(SETTLE),
                selector: ThresholdSelector::default(),
            }
        }

        fn press_edge(&self) -> bool {
            self.line.set_asserted(true);
            self.latch.on_falling_edge(self.clock.now())
        }

        fn poll(&mut self) -> ButtonOutcome {
            let mut delay = SimDelay::new(&self.clock);
            self.detector
                .poll(&self.latch, &self.line, &mut delay, &mut self.selector)
        }

        fn poll_with_release_after(&mut self, ticks: u32) -> ButtonOutcome {
            let line = &self.line;
            let mut delay = SimDelay::new(&self.clock).on_tick(|elapsed| {
                if elapsed == ticks {
                    line.set_asserted(false);
                }
            });
            self.detector
                .poll(&self.latch, line, &mut delay, &mut self.selector)
        }

        fn advance(&self, ticks: u32) {
            for _ in 0..ticks {
                self.clock.on_tick();
            }
        }
    }

    #[test]
    fn test_latch_ignores_edges_inside_window() {
        let latch = EdgeLatch::new(WINDOW);
        assert!(latch.on_falling_edge(1_000));
        latch.clear();
        assert!(!latch.on_falling_edge(1_000 + WINDOW));
        assert!(!latch.is_pending());
        assert!(latch.on_falling_edge(1_000 + WINDOW + 1));
        assert!(latch.is_pending());
    }

    #[test]
    fn test_two_edges_inside_window_give_one_pending_event() {
        let latch = EdgeLatch::new(WINDOW);
        let accepted = [latch.on_falling_edge(5_000), latch.on_falling_edge(5_050)];
        assert_eq!(accepted, [true, false]);
        assert_eq!(latch.last_trigger(), 5_000);
    }

    #[test]
    fn test_latch_window_across_wraparound() {
        let latch = EdgeLatch::new(WINDOW);
        let before_wrap = u32::MAX - 50;
        assert!(latch.on_falling_edge(before_wrap));
        latch.clear();
        // 101 ticks later, counter has wrapped
        assert!(!latch.on_falling_edge(before_wrap.wrapping_add(101)));
        assert!(latch.on_falling_edge(before_wrap.wrapping_add(WINDOW + 1)));
    }

    #[test]
    fn test_held_press_advances_exactly_once() {
        let mut rig = Rig::new();
        assert!(rig.press_edge());

        let outcome = rig.poll();
        assert_eq!(
            outcome,
            ButtonOutcome::Confirmed {
                index: 2,
                threshold_c: 35.0
            }
        );
        assert!(rig.detector.is_confirmed());

        // Still held for many loop iterations
        for _ in 0..20 {
            rig.advance(20);
            assert_eq!(rig.poll(), ButtonOutcome::Held);
        }
        assert_eq!(rig.selector.index(), 2);
    }

    #[test]
    fn test_settle_delay_runs_before_sampling() {
        let mut rig = Rig::new();
        rig.press_edge();
        let before = rig.clock.now();
        rig.poll();
        // One tick of slack on top of the requested settle time
        assert_eq!(rig.clock.elapsed_since(before), SETTLE + 1);
    }

    #[test]
    fn test_bounce_shorter_than_settle_is_rejected() {
        let mut rig = Rig::new();
        assert!(rig.press_edge());

        let outcome = rig.poll_with_release_after(SETTLE / 2);
        assert_eq!(outcome, ButtonOutcome::Rejected);
        assert_eq!(rig.selector.index(), 1);
        assert!(!rig.latch.is_pending());
        assert!(!rig.detector.is_confirmed());
    }

    #[test]
    fn test_release_rearms_for_next_press() {
        let mut rig = Rig::new();
        rig.press_edge();
        assert!(matches!(rig.poll(), ButtonOutcome::Confirmed { .. }));

        rig.line.set_asserted(false);
        assert_eq!(rig.poll(), ButtonOutcome::Released);
        assert!(!rig.latch.is_pending());
        assert_eq!(rig.poll(), ButtonOutcome::Idle);

        rig.advance(WINDOW + 1);
        assert!(rig.press_edge());
        assert_eq!(
            rig.poll(),
            ButtonOutcome::Confirmed {
                index: 0,
                threshold_c: 25.0
            }
        );
    }

    #[test]
    fn test_edge_while_held_does_not_advance_again() {
        let mut rig = Rig::new();
        rig.press_edge();
        rig.poll();

        // Contact chatter while held, outside the window
        rig.advance(WINDOW + 1);
        assert!(rig.press_edge());
        assert_eq!(rig.poll(), ButtonOutcome::Held);
        assert_eq!(rig.selector.index(), 2);
    }

    #[test]
    fn test_three_presses_return_to_start() {
        let mut rig = Rig::new();
        let start = rig.selector.current();
        let mut seen = [0usize; 3];

        for slot in &mut seen {
            rig.advance(WINDOW + 1);
            rig.press_edge();
            match rig.poll() {
                ButtonOutcome::Confirmed { index, .. } => *slot = index,
                other => panic!("expected confirmation, got {other:?}"),
            }
            rig.line.set_asserted(false);
            assert_eq!(rig.poll(), ButtonOutcome::Released);
        }

        assert_eq!(seen, [2, 0, 1]);
        assert_eq!(rig.selector.current(), start);
    }

    #[test]
    fn test_selector_wraps_index_on_construction() {
        let selector = ThresholdSelector::new(DEFAULT_THRESHOLDS_C, 4);
        assert_eq!(selector.index(), 1);
        assert_eq!(selector.current(), 30.0);
    }
}
