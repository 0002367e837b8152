//! Reading and switching the active profile in `config.toml`.

use std::path::Path;

use toml::Table;

use crate::context::InstallerContext;
use crate::error::{InstallerError, InstallerResult};
use crate::options::Profile;
use crate::patch::{patch_scalar_key, AssignmentStyle};
use crate::{log_info, log_ok};

/// Active and available profiles of a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigProfiles {
    /// Root `profile` key, if set.
    pub active: Option<String>,
    /// Keys of the `[profiles]` table, sorted.
    pub available: Vec<String>,
}

impl ConfigProfiles {
    /// Parse config text.
    pub fn parse(text: &str, path: &Path) -> InstallerResult<Self> {
        let table: Table = toml::from_str(text).map_err(|e| InstallerError::ConfigParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;

        let active = table
            .get("profile")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let mut available: Vec<String> = table
            .get("profiles")
            .and_then(|v| v.as_table())
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default();
        available.sort();

        Ok(Self { active, available })
    }

    /// Read `path`; `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> InstallerResult<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(InstallerError::io("Failed to read", path, e)),
        }
    }

    /// Whether `name` can be made active.
    pub fn accepts(&self, name: &str) -> bool {
        self.available.iter().any(|p| p == name)
            || Profile::ALL.iter().any(|p| p.as_str() == name)
    }
}

/// Persist `name` as the active profile in `~/.codex/config.toml`.
///
/// Returns `false` when the profile was already active.
pub fn set_active_profile(ctx: &InstallerContext, name: &str) -> InstallerResult<bool> {
    let path = ctx.paths().config;
    let text = ctx.read_optional(&path)?.ok_or_else(|| InstallerError::InvalidValue {
        field: "profile",
        value: name.to_string(),
        reason: format!("{} does not exist; run `codex-1up install` first", path.display()),
    })?;

    let profiles = ConfigProfiles::parse(&text, &path)?;
    if !profiles.accepts(name) {
        return Err(InstallerError::InvalidValue {
            field: "profile",
            value: name.to_string(),
            reason: format!("not defined in {}", path.display()),
        });
    }

    let patch = patch_scalar_key(&text, "profile", name, AssignmentStyle::Toml);
    if !patch.changed() {
        log_info!(ctx.logger, "Profile '{name}' is already active");
        return Ok(false);
    }

    ctx.guard().write_text(&path, &patch.text)?;
    log_ok!(ctx.logger, "Active profile set to '{name}'");
    Ok(true)
}
