//! Sound preview through whichever audio player is installed.

use std::path::Path;
use std::sync::Arc;

use crate::error::{InstallerError, InstallerResult};
use crate::process::CommandRunner;

/// Players tried in order, with the arguments placed before the file path.
pub const PLAYERS: &[(&str, &[&str])] = &[
    ("afplay", &[]),
    ("paplay", &[]),
    ("aplay", &[]),
    ("mpg123", &["-q"]),
    ("ffplay", &["-nodisp", "-autoexit", "-loglevel", "quiet"]),
];

/// Plays a sound file for the wizard's preview action.
pub trait SoundPreviewer {
    fn preview(&self, sound: &Path) -> InstallerResult<()>;
}

/// Previewer using the first working player from [`PLAYERS`].
pub struct PlayerPreview {
    runner: Arc<dyn CommandRunner>,
}

impl PlayerPreview {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl SoundPreviewer for PlayerPreview {
    fn preview(&self, sound: &Path) -> InstallerResult<()> {
        let path = sound.to_string_lossy();
        for (player, leading) in PLAYERS {
            if !self.runner.exists(player) {
                continue;
            }
            let mut args: Vec<&str> = leading.to_vec();
            args.push(&path);
            if self.runner.run(player, &args).is_ok() {
                return Ok(());
            }
        }
        Err(InstallerError::NoAudioPlayer)
    }
}

/// Previewer that does nothing. For non-audio environments and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPreview;

impl SoundPreviewer for SilentPreview {
    fn preview(&self, _sound: &Path) -> InstallerResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ScriptedRunner;

    #[test]
    fn test_first_available_player_used() {
        let runner = Arc::new(ScriptedRunner::new().with_programs(&["aplay", "ffplay"]));
        let preview = PlayerPreview::new(runner.clone());
        preview.preview(Path::new("/s/noti_1.wav")).unwrap();
        assert_eq!(runner.calls(), vec!["aplay /s/noti_1.wav"]);
    }

    #[test]
    fn test_falls_through_failing_player() {
        let runner = Arc::new(
            ScriptedRunner::new()
                .with_programs(&["paplay", "mpg123"])
                .failing("paplay"),
        );
        let preview = PlayerPreview::new(runner.clone());
        preview.preview(Path::new("/s/a.mp3")).unwrap();
        assert_eq!(runner.calls(), vec!["paplay /s/a.mp3", "mpg123 -q /s/a.mp3"]);
    }

    #[test]
    fn test_no_player_is_error() {
        let preview = PlayerPreview::new(Arc::new(ScriptedRunner::new()));
        assert!(matches!(
            preview.preview(Path::new("/s/a.wav")),
            Err(InstallerError::NoAudioPlayer)
        ));
    }
}
