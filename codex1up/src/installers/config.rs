//! `~/.codex/config.toml` from the bundled multi-profile template.

use crate::context::InstallerContext;
use crate::error::InstallerResult;
use crate::options::{Decision, Profile};
use crate::patch::{set_scalar_key, AssignmentStyle};
use crate::{log_info, log_ok, log_warn};

use super::InstallStep;

/// Template text with the root `profile` key set.
pub fn render_config(template: &str, profile: Profile) -> String {
    set_scalar_key(template, "profile", profile.as_str(), AssignmentStyle::Toml)
}

/// Creates the config, or replaces it when overwrite was chosen.
///
/// The file is written once, already carrying the active profile. An
/// existing config whose content already matches is not rewritten, so a
/// re-run does not leave another backup behind.
pub struct ConfigStep;

impl InstallStep for ConfigStep {
    fn name(&self) -> &'static str {
        "config"
    }

    fn run(&self, ctx: &InstallerContext) -> InstallerResult<()> {
        let paths = ctx.paths();
        let assets = ctx.assets();
        let template = ctx.read(ctx.require_asset(&assets.config_template)?)?;
        let profile = ctx.options.profile;
        let rendered = render_config(&template, profile);

        log_info!(
            ctx.logger,
            "Reasoning steps: {}",
            ctx.options.reasoning.as_str()
        );

        let Some(existing) = ctx.read_optional(&paths.config)? else {
            log_info!(
                ctx.logger,
                "Creating unified Codex config with multiple profiles at {}",
                paths.config.display()
            );
            log_info!(ctx.logger, "Setting active profile to: {profile}");
            ctx.guard().write_text(&paths.config, &rendered)?;
            log_ok!(ctx.logger, "Created ~/.codex/config.toml");
            log_info!(
                ctx.logger,
                "Tip: use 'codex --profile <name>' to switch at runtime or 'codex-1up config set-profile <name>' to persist."
            );
            return Ok(());
        };

        log_warn!(ctx.logger, "~/.codex/config.toml already exists");
        match ctx.options.overwrite_config {
            Decision::Yes if existing == rendered => {
                log_info!(ctx.logger, "Config already matches the bundled template; nothing to do");
            }
            Decision::Yes => {
                log_info!(ctx.logger, "Setting active profile to: {profile}");
                ctx.guard().write_text(&paths.config, &rendered)?;
                log_ok!(ctx.logger, "Overwrote ~/.codex/config.toml with unified template");
            }
            Decision::No | Decision::Unset => {
                log_info!(ctx.logger, "Keeping existing config unchanged");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Environment, ROOT_SENTINEL};
    use crate::error::InstallerError;
    use crate::log::MemoryLogger;
    use crate::options::InstallerOptions;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    const TEMPLATE: &str = "profile = \"balanced\"\n\n[profiles.balanced]\nmodel = \"gpt-5\"\n\n[profiles.yolo]\nmodel = \"gpt-5\"\n";

    struct Fixture {
        home: TempDir,
        root: TempDir,
        logger: Arc<MemoryLogger>,
    }

    impl Fixture {
        fn new() -> Self {
            let root = TempDir::new().unwrap();
            fs::create_dir_all(root.path().join("templates")).unwrap();
            fs::write(root.path().join(ROOT_SENTINEL), TEMPLATE).unwrap();
            Self {
                home: TempDir::new().unwrap(),
                root,
                logger: Arc::new(MemoryLogger::new()),
            }
        }

        fn run(&self, options: InstallerOptions) -> InstallerResult<()> {
            let ctx = Environment::new(self.home.path(), self.root.path())
                .with_logger(self.logger.clone())
                .into_context(options);
            ConfigStep.run(&ctx)
        }

        fn config(&self) -> std::path::PathBuf {
            self.home.path().join(".codex/config.toml")
        }

        fn backups(&self) -> usize {
            let dir = self.home.path().join(".codex");
            fs::read_dir(dir)
                .unwrap()
                .filter(|e| {
                    e.as_ref()
                        .unwrap()
                        .file_name()
                        .to_string_lossy()
                        .contains(".backup.")
                })
                .count()
        }
    }

    #[test]
    fn test_render_sets_profile() {
        let out = render_config(TEMPLATE, Profile::Safe);
        assert!(out.starts_with("profile = \"safe\"\n"));
        assert!(out.contains("[profiles.yolo]"));
    }

    #[test]
    fn test_creates_config_with_profile() {
        let fx = Fixture::new();
        fx.run(InstallerOptions {
            profile: Profile::Safe,
            ..InstallerOptions::default()
        })
        .unwrap();
        let text = fs::read_to_string(fx.config()).unwrap();
        assert_eq!(text, render_config(TEMPLATE, Profile::Safe));
        assert_eq!(fx.backups(), 0);
    }

    #[test]
    fn test_keeps_existing_when_not_overwriting() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.config().parent().unwrap()).unwrap();
        fs::write(fx.config(), "model = \"mine\"\n").unwrap();
        fx.run(InstallerOptions {
            overwrite_config: Decision::No,
            ..InstallerOptions::default()
        })
        .unwrap();
        assert_eq!(fs::read_to_string(fx.config()).unwrap(), "model = \"mine\"\n");
        assert!(fx.logger.contains("Keeping existing config unchanged"));
        assert_eq!(fx.backups(), 0);
    }

    #[test]
    fn test_overwrite_backs_up_once_and_is_idempotent() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.config().parent().unwrap()).unwrap();
        fs::write(fx.config(), "model = \"mine\"\n").unwrap();
        let options = InstallerOptions {
            profile: Profile::Yolo,
            overwrite_config: Decision::Yes,
            ..InstallerOptions::default()
        };

        fx.run(options.clone()).unwrap();
        assert!(fs::read_to_string(fx.config())
            .unwrap()
            .starts_with("profile = \"yolo\""));
        assert_eq!(fx.backups(), 1);

        fx.run(options).unwrap();
        assert_eq!(fx.backups(), 1);
    }

    #[test]
    fn test_dry_run_creates_nothing() {
        let fx = Fixture::new();
        fx.run(InstallerOptions {
            dry_run: true,
            ..InstallerOptions::default()
        })
        .unwrap();
        assert!(!fx.config().exists());
        assert!(fx.logger.contains("[dry-run] write"));
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let fx = Fixture::new();
        fs::remove_file(fx.root.path().join(ROOT_SENTINEL)).unwrap();
        let err = fx.run(InstallerOptions::default()).unwrap_err();
        assert!(matches!(err, InstallerError::MissingAsset { .. }));
        assert!(!Path::new(&fx.config()).exists());
    }
}
