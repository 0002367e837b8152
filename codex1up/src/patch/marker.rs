//! Marker block codec.
//!
//! A marker block is a region of generated text inside a user-owned file:
//!
//! ```text
//! >>> codex-1up >>>
//! ...generated body...
//! <<< codex-1up <<<
//! ```
//!
//! or the same pair prefixed with `# ` (the commented encoding). Blocks are
//! located by explicit span search: each end marker pairs with the nearest
//! start marker before it, so an orphan start marker never swallows the
//! text between it and a later block.

use std::ops::Range;

/// How the marker lines of a block are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// `>>> name >>>` ... `<<< name <<<`
    Plain,
    /// `# >>> name >>>` ... `# <<< name <<<`
    Commented,
}

impl MarkerStyle {
    fn prefix(self) -> &'static str {
        match self {
            MarkerStyle::Plain => "",
            MarkerStyle::Commented => "# ",
        }
    }
}

/// A named marker block in one encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerBlock {
    name: String,
    style: MarkerStyle,
}

/// Result of scanning a text for one encoding of a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockScan {
    /// Byte spans to remove, in ascending order, non-overlapping.
    pub spans: Vec<Range<usize>>,
    /// Offset of a start marker that has no matching end marker.
    pub unterminated_at: Option<usize>,
}

impl MarkerBlock {
    /// Create a block descriptor.
    pub fn new(name: impl Into<String>, style: MarkerStyle) -> Self {
        Self {
            name: name.into(),
            style,
        }
    }

    /// Block name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Marker encoding.
    pub fn style(&self) -> MarkerStyle {
        self.style
    }

    /// Opening marker text.
    pub fn start_marker(&self) -> String {
        format!("{}>>> {} >>>", self.style.prefix(), self.name)
    }

    /// Closing marker text.
    pub fn end_marker(&self) -> String {
        format!("{}<<< {} <<<", self.style.prefix(), self.name)
    }

    /// Render the block around `body`.
    ///
    /// A body that does not end in a newline gets one so the end marker
    /// always sits on its own line.
    pub fn render(&self, body: &str) -> String {
        let mut out = self.start_marker();
        out.push('\n');
        out.push_str(body);
        if !body.is_empty() && !body.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&self.end_marker());
        out.push('\n');
        out
    }

    /// Find every span of this block in `text`.
    ///
    /// Each span runs from a start marker through the first following end
    /// marker plus at most one trailing newline. When further start markers
    /// sit between the two, the span begins at the last of them and the
    /// earlier ones stay in the text. Scanning resumes after the span, so
    /// spans never overlap. A start marker without an end marker ends the
    /// scan and is reported in `unterminated_at`.
    pub fn scan(&self, text: &str) -> BlockScan {
        let start_marker = self.start_marker();
        let end_marker = self.end_marker();
        let mut scan = BlockScan::default();
        let mut pos = 0;

        while let Some(rel_start) = text[pos..].find(&start_marker) {
            let first_start = pos + rel_start;
            let body_from = first_start + start_marker.len();
            let Some(rel_end) = text[body_from..].find(&end_marker) else {
                scan.unterminated_at = Some(first_start);
                break;
            };
            let end_at = body_from + rel_end;
            // Nearest start before the end marker; earlier ones are orphans.
            let start = text[first_start..end_at]
                .rfind(&start_marker)
                .map_or(first_start, |rel| first_start + rel);
            let mut end = end_at + end_marker.len();
            if text[end..].starts_with("\r\n") {
                end += 2;
            } else if text[end..].starts_with('\n') {
                end += 1;
            }
            scan.spans.push(start..end);
            pos = end;
        }

        scan
    }

    /// Remove every span found by [`scan`](Self::scan).
    ///
    /// Returns the new text and the number of blocks removed. Text outside
    /// the spans is copied byte for byte.
    pub fn remove_from(&self, text: &str) -> (String, usize) {
        let scan = self.scan(text);
        if scan.spans.is_empty() {
            return (text.to_string(), 0);
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for span in &scan.spans {
            out.push_str(&text[last..span.start]);
            last = span.end;
        }
        out.push_str(&text[last..]);
        (out, scan.spans.len())
    }
}

/// Remove every block named `name`, in either encoding.
///
/// The commented encoding is removed first: its markers contain the plain
/// markers as substrings, so the reverse order would leave `# ` fragments
/// behind. Returns `text` unchanged when no block is present.
pub fn strip(text: &str, name: &str) -> String {
    strip_counted(text, name).0
}

/// [`strip`] that also reports how many blocks were removed.
pub(crate) fn strip_counted(text: &str, name: &str) -> (String, usize) {
    let (without_commented, commented) =
        MarkerBlock::new(name, MarkerStyle::Commented).remove_from(text);
    let (without_plain, plain) =
        MarkerBlock::new(name, MarkerStyle::Plain).remove_from(&without_commented);
    (without_plain, commented + plain)
}

/// Replace any existing `name` block with a fresh plain block at end-of-file.
///
/// The block is appended verbatim: no separator newline is invented, which
/// keeps `strip(upsert(t, n, b), n) == t` for every `t` without a block.
pub fn upsert(text: &str, name: &str, body: &str) -> String {
    upsert_styled(text, name, body, MarkerStyle::Plain)
}

/// [`upsert`] with an explicit marker encoding.
pub fn upsert_styled(text: &str, name: &str, body: &str, style: MarkerStyle) -> String {
    let mut out = strip(text, name);
    out.push_str(&MarkerBlock::new(name, style).render(body));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: &str = "codex-1up";

    #[test]
    fn test_render_plain_block() {
        let block = MarkerBlock::new(NAME, MarkerStyle::Plain);
        assert_eq!(
            block.render("export A=1\n"),
            ">>> codex-1up >>>\nexport A=1\n<<< codex-1up <<<\n"
        );
    }

    #[test]
    fn test_render_adds_missing_body_newline() {
        let block = MarkerBlock::new(NAME, MarkerStyle::Commented);
        assert_eq!(
            block.render("x"),
            "# >>> codex-1up >>>\nx\n# <<< codex-1up <<<\n"
        );
    }

    #[test]
    fn test_upsert_appends_when_absent() {
        let out = upsert("alias ll='ls -la'\n", NAME, "A=1\n");
        assert_eq!(
            out,
            "alias ll='ls -la'\n>>> codex-1up >>>\nA=1\n<<< codex-1up <<<\n"
        );
    }

    #[test]
    fn test_upsert_replaces_existing_block() {
        let text = "a\n>>> codex-1up >>>\nOLD\n<<< codex-1up <<<\nb\n";
        let out = upsert(text, NAME, "NEW\n");
        assert_eq!(out, "a\nb\n>>> codex-1up >>>\nNEW\n<<< codex-1up <<<\n");
        assert_eq!(out.matches(">>> codex-1up >>>").count(), 1);
    }

    #[test]
    fn test_repeated_upsert_keeps_single_block() {
        let mut text = String::from("user line\n");
        for body in ["one\n", "two\n", "three\n"] {
            text = upsert(&text, NAME, body);
        }
        assert_eq!(text.matches(">>> codex-1up >>>").count(), 1);
        assert!(text.contains("three"));
        assert!(!text.contains("one"));
    }

    #[test]
    fn test_strip_noop_without_block() {
        let text = "  keep   trailing spaces  \n\n";
        assert_eq!(strip(text, NAME), text);
    }

    #[test]
    fn test_strip_removes_one_trailing_newline_only() {
        let text = "before\n>>> codex-1up >>>\nbody\n<<< codex-1up <<<\n\nafter\n";
        assert_eq!(strip(text, NAME), "before\n\nafter\n");
    }

    #[test]
    fn test_strip_handles_crlf_after_end_marker() {
        let text = "x\r\n>>> codex-1up >>>\r\nbody\r\n<<< codex-1up <<<\r\ny\r\n";
        assert_eq!(strip(text, NAME), "x\r\ny\r\n");
    }

    #[test]
    fn test_strip_first_start_to_first_end() {
        let text = ">>> codex-1up >>>\na\n<<< codex-1up <<<\nkeep\n>>> codex-1up >>>\nb\n<<< codex-1up <<<\n";
        assert_eq!(strip(text, NAME), "keep\n");
    }

    #[test]
    fn test_strip_ignores_other_names() {
        let text = ">>> other >>>\nx\n<<< other <<<\n";
        assert_eq!(strip(text, NAME), text);
    }

    #[test]
    fn test_unterminated_block_left_alone() {
        let text = "a\n>>> codex-1up >>>\nno end here\n";
        let block = MarkerBlock::new(NAME, MarkerStyle::Plain);
        let scan = block.scan(text);
        assert!(scan.spans.is_empty());
        assert_eq!(scan.unterminated_at, Some(2));
        assert_eq!(strip(text, NAME), text);
    }

    #[test]
    fn test_commented_block_removed_without_residue() {
        let text = "a\n# >>> codex-1up >>>\nbody\n# <<< codex-1up <<<\nb\n";
        assert_eq!(strip(text, NAME), "a\nb\n");
    }

    #[test]
    fn test_orphan_start_marker_keeps_following_text() {
        let text = "keep1\n>>> codex-1up >>>\nuser line\n";
        let patched = upsert(text, NAME, "A=1\n");
        assert_eq!(strip(&patched, NAME), text);
        let twice = upsert(&patched, NAME, "A=1\n");
        assert_eq!(twice, patched);
        assert!(twice.contains("user line"));
    }

    #[test]
    fn test_end_marker_pairs_with_nearest_start() {
        let text = "a\n>>> codex-1up >>>\nmine\n>>> codex-1up >>>\nx\n<<< codex-1up <<<\nb\n";
        let block = MarkerBlock::new(NAME, MarkerStyle::Plain);
        let scan = block.scan(text);
        assert_eq!(scan.spans.len(), 1);
        assert_eq!(&text[scan.spans[0].clone()], ">>> codex-1up >>>\nx\n<<< codex-1up <<<\n");
        assert_eq!(strip(text, NAME), "a\n>>> codex-1up >>>\nmine\nb\n");
    }

    #[test]
    fn test_round_trip_without_trailing_newline() {
        let text = "no newline at end";
        let patched = upsert(text, NAME, "x\n");
        assert_eq!(strip(&patched, NAME), text);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Block-free text that may still carry orphan start markers.
        fn user_text() -> impl Strategy<Value = String> {
            prop::collection::vec(
                prop_oneof![
                    4 => "[a-z #<>\n]{0,12}",
                    1 => Just(">>> codex-1up >>>\n".to_string()),
                    1 => Just("# >>> codex-1up >>>\n".to_string()),
                ],
                0..6,
            )
            .prop_map(|chunks| chunks.concat())
        }

        proptest! {
            #[test]
            fn strip_inverts_upsert(
                text in user_text(),
                body in "[a-z =\n]{0,32}",
            ) {
                let patched = upsert(&text, NAME, &body);
                prop_assert_eq!(strip(&patched, NAME), text);
            }

            #[test]
            fn upsert_is_idempotent(
                text in user_text(),
                body in "[a-z =\n]{0,32}",
            ) {
                let once = upsert(&text, NAME, &body);
                let twice = upsert(&once, NAME, &body);
                prop_assert_eq!(once, twice);
            }
        }
    }
}
