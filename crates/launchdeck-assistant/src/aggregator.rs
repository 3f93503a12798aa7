//! Streaming reply aggregation

/// Concatenates reply fragments in arrival order.
///
/// Every push yields the full text so far, which is what the in-progress turn
/// displays. Nothing is reordered, dropped, or separated.
#[derive(Debug, Default)]
pub struct FragmentAccumulator {
    text: String,
    fragments: usize,
}

impl FragmentAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment and return the text so far
    pub fn push(&mut self, fragment: &str) -> &str {
        self.text.push_str(fragment);
        self.fragments += 1;
        &self.text
    }

    /// Number of fragments applied
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_returns_running_text() {
        let mut acc = FragmentAccumulator::new();
        let seen: Vec<String> = ["Hel", "lo, ", "world"]
            .iter()
            .map(|f| acc.push(f).to_string())
            .collect();
        assert_eq!(seen, vec!["Hel", "Hello, ", "Hello, world"]);
        assert_eq!(acc.fragment_count(), 3);
    }

    #[test]
    fn test_no_separator_added() {
        let mut acc = FragmentAccumulator::new();
        acc.push("a");
        acc.push(" ");
        assert_eq!(acc.push("b"), "a b");
    }
}
