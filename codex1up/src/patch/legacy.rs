//! Cleanup of shell rc blocks written by older installer releases.
//!
//! Earlier releases appended a `codex-1up` block to the user's shell rc
//! files. Current releases never write there; the sound step strips
//! whatever such blocks remain, in both encodings, before it does anything
//! else and whatever sound was chosen.

use std::path::{Path, PathBuf};

use super::marker::{strip_counted, MarkerBlock, MarkerStyle};

/// Marker name used by every block this project has ever written.
pub const PROJECT_MARKER: &str = "codex-1up";

/// Shell rc files, relative to the home directory, that older releases patched.
pub const LEGACY_RC_FILES: &[&str] = &[".bashrc", ".zshrc", ".config/fish/config.fish"];

/// Result of cleaning one file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyCleanup {
    /// Text with all terminated blocks removed.
    pub text: String,
    /// Number of blocks removed.
    pub removed: usize,
    /// A start marker without an end marker remains in `text`.
    pub unterminated: bool,
}

impl LegacyCleanup {
    /// True if the text differs from the input.
    pub fn changed(&self) -> bool {
        self.removed > 0
    }
}

/// Remove every `name` block from `text`, commented encoding first.
pub fn remove_legacy_blocks(text: &str, name: &str) -> LegacyCleanup {
    let (cleaned, removed) = strip_counted(text, name);
    let unterminated = [MarkerStyle::Commented, MarkerStyle::Plain]
        .into_iter()
        .any(|style| MarkerBlock::new(name, style).scan(&cleaned).unterminated_at.is_some());

    LegacyCleanup {
        text: cleaned,
        removed,
        unterminated,
    }
}

/// Absolute paths of the legacy rc files under `home`.
pub fn legacy_rc_paths(home: &Path) -> Vec<PathBuf> {
    LEGACY_RC_FILES.iter().map(|rel| home.join(rel)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_both_encodings() {
        let text = concat!(
            "export PATH=$HOME/bin:$PATH\n",
            "# >>> codex-1up >>>\n",
            "alias cx=codex\n",
            "# <<< codex-1up <<<\n",
            "set -o vi\n",
            ">>> codex-1up >>>\n",
            "export CODEX=1\n",
            "<<< codex-1up <<<\n",
        );
        let cleanup = remove_legacy_blocks(text, PROJECT_MARKER);
        assert_eq!(cleanup.text, "export PATH=$HOME/bin:$PATH\nset -o vi\n");
        assert_eq!(cleanup.removed, 2);
        assert!(cleanup.changed());
        assert!(!cleanup.unterminated);
    }

    #[test]
    fn test_clean_text_untouched() {
        let text = "alias ll='ls -la'\n";
        let cleanup = remove_legacy_blocks(text, PROJECT_MARKER);
        assert_eq!(cleanup.text, text);
        assert!(!cleanup.changed());
    }

    #[test]
    fn test_reports_unterminated_block() {
        let text = "a\n# >>> codex-1up >>>\nhalf written\n";
        let cleanup = remove_legacy_blocks(text, PROJECT_MARKER);
        assert_eq!(cleanup.text, text);
        assert!(cleanup.unterminated);
        assert!(!cleanup.changed());
    }

    #[test]
    fn test_orphan_start_keeps_user_lines() {
        let text = concat!(
            "a\n",
            "# >>> codex-1up >>>\n",
            "alias mine=1\n",
            "# >>> codex-1up >>>\n",
            "x\n",
            "# <<< codex-1up <<<\n",
            "b\n",
        );
        let cleanup = remove_legacy_blocks(text, PROJECT_MARKER);
        assert_eq!(cleanup.text, "a\n# >>> codex-1up >>>\nalias mine=1\nb\n");
        assert_eq!(cleanup.removed, 1);
        assert!(cleanup.unterminated);
    }

    #[test]
    fn test_second_pass_is_noop() {
        let text = "x\n# >>> codex-1up >>>\ny\n# <<< codex-1up <<<\n";
        let first = remove_legacy_blocks(text, PROJECT_MARKER);
        let second = remove_legacy_blocks(&first.text, PROJECT_MARKER);
        assert_eq!(first.text, second.text);
        assert_eq!(second.removed, 0);
    }

    #[test]
    fn test_legacy_rc_paths() {
        let paths = legacy_rc_paths(Path::new("/home/u"));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/home/u/.bashrc"),
                PathBuf::from("/home/u/.zshrc"),
                PathBuf::from("/home/u/.config/fish/config.fish"),
            ]
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn marker_free_text_is_identity(text in "[a-z #<>=\"$\n\r\t]{0,96}") {
                let cleanup = remove_legacy_blocks(&text, PROJECT_MARKER);
                prop_assert_eq!(cleanup.text, text);
                prop_assert_eq!(cleanup.removed, 0);
            }

            #[test]
            fn block_removal_keeps_surrounding_lines(
                before in "([a-z =]{0,12}\n){0,4}",
                body in "([a-z =]{0,12}\n){0,3}",
                after in "([a-z =]{0,12}\n){0,4}",
                commented in any::<bool>(),
            ) {
                let prefix = if commented { "# " } else { "" };
                let text = format!(
                    "{before}{prefix}>>> codex-1up >>>\n{body}{prefix}<<< codex-1up <<<\n{after}"
                );
                let cleanup = remove_legacy_blocks(&text, PROJECT_MARKER);
                prop_assert_eq!(cleanup.text, format!("{before}{after}"));
                prop_assert_eq!(cleanup.removed, 1);
            }
        }
    }
}
