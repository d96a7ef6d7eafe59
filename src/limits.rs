/// Default cap on decoded array lengths: 16 Mi elements.
pub const DEFAULT_MAX_ARRAY_LEN: usize = 16 * 1024 * 1024;

/// Default cap on decoded string and opaque lengths: 16 MiB.
pub const DEFAULT_MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// Bounds a reader applies to length prefixes before allocating.
///
/// A prefix above these limits is reported as corrupt data. Bounded backends
/// additionally reject prefixes that exceed the bytes left in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum element count of a decoded array.
    pub max_array_len: usize,
    /// Maximum byte length of a decoded string or opaque.
    pub max_string_len: usize,
}

impl Limits {
    pub fn with_max_array_len(mut self, max: usize) -> Self {
        self.max_array_len = max;
        self
    }

    pub fn with_max_string_len(mut self, max: usize) -> Self {
        self.max_string_len = max;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            max_string_len: DEFAULT_MAX_STRING_LEN,
        }
    }
}
