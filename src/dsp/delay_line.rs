//! Circular delay line for the Haas widening effect

/// Fixed-capacity ring buffer with read-before-write ordering
///
/// Reading at the cursor before writing yields the sample written
/// `capacity` steps earlier. A zero capacity turns the line into a bypass.
#[derive(Debug, Clone, Default)]
pub struct DelayLine {
    buffer: Vec<f32>,
    /// Write position, always in `[0, capacity)` when capacity > 0
    cursor: usize,
}

impl DelayLine {
    /// Create an empty (bypassing) delay line
    pub fn new() -> Self {
        Self::default()
    }

    /// Reallocate to exactly `required_len` samples when the capacity differs
    ///
    /// A resize zero-fills the buffer and rewinds the cursor, discarding any
    /// history. Returns whether a reallocation happened.
    pub fn resize_if_needed(&mut self, required_len: usize) -> bool {
        if self.buffer.len() == required_len {
            return false;
        }
        self.buffer = vec![0.0; required_len];
        self.cursor = 0;
        true
    }

    /// Return the oldest sample and store `input` in its place
    #[inline]
    pub fn read_then_write(&mut self, input: f32) -> f32 {
        let capacity = self.buffer.len();
        if capacity == 0 {
            return input;
        }
        let delayed = self.buffer[self.cursor];
        self.buffer[self.cursor] = input;
        self.cursor = (self.cursor + 1) % capacity;
        delayed
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True when every stored sample is exactly zero
    pub fn is_silent(&self) -> bool {
        self.buffer.iter().all(|&s| s == 0.0)
    }
}
