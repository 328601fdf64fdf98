//! Separator hierarchies.
//!
//! A [`SeparatorSet`] is tried in order: the first separator that breaks a
//! piece into more than one part wins, and finer separators are only used
//! on parts that are still too large.

use docsplit_core::{Placement, SeparatorPreset};

/// Ordered separators, most structurally significant first.
///
/// An empty string separator splits by character and should come last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorSet {
    separators: Vec<String>,
    placement: Placement,
}

impl SeparatorSet {
    /// Create a set with trailing placement.
    pub fn new<I, S>(separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            separators: separators.into_iter().map(Into::into).collect(),
            placement: Placement::Trailing,
        }
    }

    /// Paragraphs, lines, sentences, words, characters.
    pub fn text() -> Self {
        Self::new(["\n\n", "\n", ". ", " ", ""])
    }

    /// Markdown structure first: headings, code fences and horizontal rules,
    /// then paragraphs, lines, words, characters.
    ///
    /// Uses leading placement so a heading opens the section it names.
    ///
    /// Separators are literals, so only three-character rules (`---`, `***`,
    /// `___`) split at rule level. Longer rules such as `-----` fall through
    /// to the paragraph and line separators.
    pub fn markdown() -> Self {
        Self::new([
            "\n# ",
            "\n## ",
            "\n### ",
            "\n#### ",
            "\n##### ",
            "\n###### ",
            "```\n",
            "\n***\n",
            "\n---\n",
            "\n___\n",
            "\n\n",
            "\n",
            " ",
            "",
        ])
        .with_placement(SeparatorPreset::Markdown.placement())
    }

    /// Build the set for a configured preset.
    pub fn from_preset(preset: SeparatorPreset) -> Self {
        match preset {
            SeparatorPreset::Markdown => Self::markdown(),
            SeparatorPreset::Text => Self::text(),
        }
    }

    /// Set separator placement.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Separator placement.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Separators in priority order.
    pub fn as_slice(&self) -> &[String] {
        &self.separators
    }

    pub fn len(&self) -> usize {
        self.separators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.separators.is_empty()
    }
}

impl Default for SeparatorSet {
    fn default() -> Self {
        Self::text()
    }
}

/// Split `text` on `separator`, keeping the separator inside the pieces.
///
/// Concatenating the result always yields `text`. An empty separator splits
/// into single characters.
pub fn split_keeping<'a>(text: &'a str, separator: &str, placement: Placement) -> Vec<&'a str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect();
    }

    match placement {
        Placement::Trailing => text.split_inclusive(separator).collect(),
        Placement::Leading => {
            let mut pieces = Vec::new();
            let mut last = 0;
            for (idx, _) in text.match_indices(separator) {
                if idx > last {
                    pieces.push(&text[last..idx]);
                    last = idx;
                }
            }
            if last < text.len() {
                pieces.push(&text[last..]);
            }
            pieces
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trailing() {
        let pieces = split_keeping("a\n\nb\n\nc", "\n\n", Placement::Trailing);
        assert_eq!(pieces, vec!["a\n\n", "b\n\n", "c"]);
    }

    #[test]
    fn test_split_trailing_separator_at_end() {
        let pieces = split_keeping("one. two. ", ". ", Placement::Trailing);
        assert_eq!(pieces, vec!["one. ", "two. "]);
    }

    #[test]
    fn test_split_leading() {
        let pieces = split_keeping("intro\n# A\ntext\n# B", "\n# ", Placement::Leading);
        assert_eq!(pieces, vec!["intro", "\n# A\ntext", "\n# B"]);
    }

    #[test]
    fn test_split_leading_separator_at_start() {
        let pieces = split_keeping("\n# A\n# B", "\n# ", Placement::Leading);
        assert_eq!(pieces, vec!["\n# A", "\n# B"]);
    }

    #[test]
    fn test_split_chars() {
        let pieces = split_keeping("héy", "", Placement::Trailing);
        assert_eq!(pieces, vec!["h", "é", "y"]);
    }

    #[test]
    fn test_split_no_match() {
        assert_eq!(split_keeping("abc", "\n", Placement::Trailing), vec!["abc"]);
        assert_eq!(split_keeping("abc", "\n", Placement::Leading), vec!["abc"]);
    }

    #[test]
    fn test_split_reconstructs() {
        let text = "# T\n\nPara one.\nLine two. More.\n\n## S\n\nEnd";
        for sep in SeparatorSet::markdown().as_slice() {
            for placement in [Placement::Trailing, Placement::Leading] {
                let joined: String = split_keeping(text, sep, placement).concat();
                assert_eq!(joined, text, "separator {:?}", sep);
            }
        }
    }

    #[test]
    fn test_longer_rules_split_on_lines() {
        let text = "intro\n-----\noutro";
        for rule in ["\n***\n", "\n---\n", "\n___\n"] {
            assert_eq!(split_keeping(text, rule, Placement::Leading), vec![text]);
        }
        assert_eq!(
            split_keeping(text, "\n", Placement::Leading),
            vec!["intro", "\n-----", "\noutro"]
        );
    }

    #[test]
    fn test_presets() {
        let text = SeparatorSet::text();
        assert_eq!(text.placement(), Placement::Trailing);
        assert_eq!(text.as_slice()[0], "\n\n");
        assert_eq!(text.as_slice().last().map(String::as_str), Some(""));

        let markdown = SeparatorSet::from_preset(SeparatorPreset::Markdown);
        assert_eq!(markdown.placement(), Placement::Leading);
        assert_eq!(markdown.as_slice()[0], "\n# ");
        assert_eq!(markdown.as_slice().last().map(String::as_str), Some(""));
    }
}
