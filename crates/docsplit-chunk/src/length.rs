//! Size accounting for chunks.

use std::fmt;
use std::sync::Arc;

/// Measures text in the units `max_size` and `overlap` are expressed in.
#[derive(Clone, Default)]
pub enum LengthFunction {
    /// Unicode scalar values.
    #[default]
    Chars,
    /// Caller-supplied measure, e.g. a tokenizer count.
    Custom(Arc<dyn Fn(&str) -> usize + Send + Sync>),
}

impl LengthFunction {
    /// Wrap a custom measure.
    pub fn custom<F>(measure: F) -> Self
    where
        F: Fn(&str) -> usize + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(measure))
    }

    /// Length of `text`.
    pub fn measure(&self, text: &str) -> usize {
        match self {
            Self::Chars => text.chars().count(),
            Self::Custom(measure) => measure(text),
        }
    }
}

impl fmt::Debug for LengthFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chars => f.write_str("Chars"),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}
