//! Moving Average Smoothing
//!
//! This module provides a bounded moving average that suppresses sensor
//! jitter before the signal reaches the motion controller.

/// Largest supported window capacity.
pub const MAX_WINDOW: usize = 64;

/// Default window capacity.
pub const DEFAULT_WINDOW: usize = 10;

/// Default symmetric output limit.
pub const DEFAULT_OUTPUT_LIMIT: f64 = 10.0;

/// State for the moving average filter.
///
/// Holds up to `capacity` most recent samples in insertion order. When full,
/// the oldest sample is evicted to make room for the next one. The output is
/// the arithmetic mean of the current contents, clamped to `±limit`.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - Inline storage, no heap allocations
/// - Bounded execution time
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct SmoothingWindow {
    samples: [f64; MAX_WINDOW],
    head: usize,
    len: usize,
    capacity: usize,
    limit: f64,
}

impl SmoothingWindow {
    /// Create an empty window.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of samples averaged, clamped to `1..=MAX_WINDOW`
    /// * `limit` - Symmetric output bound; its absolute value is used. A
    ///   non-finite limit falls back to [`DEFAULT_OUTPUT_LIMIT`].
    ///
    /// # Example
    ///
    /// ```
    /// use gyrodrive_filters::SmoothingWindow;
    ///
    /// let window = SmoothingWindow::new(10, 10.0);
    /// assert_eq!(window.capacity(), 10);
    /// assert!(window.is_empty());
    /// ```
    pub fn new(capacity: usize, limit: f64) -> Self {
        Self {
            samples: [0.0; MAX_WINDOW],
            head: 0,
            len: 0,
            capacity: capacity.clamp(1, MAX_WINDOW),
            limit: if limit.is_finite() {
                limit.abs()
            } else {
                DEFAULT_OUTPUT_LIMIT
            },
        }
    }

    /// Append a sample, evicting the oldest one if the window is full.
    ///
    /// Non-finite samples are ignored.
    pub fn push(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let tail = (self.head + self.len) % self.capacity;
        if let Some(slot) = self.samples.get_mut(tail) {
            *slot = value;
        }
        if self.len == self.capacity {
            self.head = (self.head + 1) % self.capacity;
        } else {
            self.len += 1;
        }
    }

    /// Clamped mean of the current contents, 0.0 when empty.
    ///
    /// Each sample is scaled before summing so the mean of finite samples
    /// stays finite for any magnitude.
    pub fn output(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        let n = self.len as f64;
        let mean: f64 = self.iter().map(|v| v / n).sum();
        if mean.is_nan() {
            return 0.0;
        }
        mean.clamp(-self.limit, self.limit)
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).filter_map(move |i| self.samples.get((self.head + i) % self.capacity).copied())
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no sample has been pushed since the last reset.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of samples held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Output bound.
    pub fn limit(&self) -> f64 {
        self.limit
    }
}

impl Default for SmoothingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_OUTPUT_LIMIT)
    }
}

/// Moving average filter: push `input`, return the clamped window mean.
///
/// # Example
///
/// ```
/// use gyrodrive_filters::prelude::*;
///
/// let mut window = SmoothingWindow::new(2, 10.0);
/// smoothing_filter(30.0, &mut window);
/// let out = smoothing_filter(30.0, &mut window);
/// assert!((out - 10.0).abs() < f64::EPSILON); // clamped
/// ```
#[inline]
pub fn smoothing_filter(input: f64, state: &mut SmoothingWindow) -> f64 {
    state.push(input);
    state.output()
}
