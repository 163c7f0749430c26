//! Where the generation settings come from.
//!
//! The first command-line argument wins, then the `TERRACE_SETTINGS`
//! environment variable. With neither, the built-in defaults are used.

use std::path::PathBuf;

use bevy::prelude::*;

use worldgen::WorldGenSettings;

pub const SETTINGS_ENV_VAR: &str = "TERRACE_SETTINGS";

/// Settings file chosen at launch, if any.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSource(pub Option<PathBuf>);

impl SettingsSource {
    pub fn from_env() -> Self {
        Self::resolve(std::env::args().skip(1), std::env::var(SETTINGS_ENV_VAR).ok())
    }

    pub fn resolve(mut args: impl Iterator<Item = String>, env: Option<String>) -> Self {
        let path = args
            .next()
            .or(env)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        Self(path)
    }
}

/// Load the settings file into a [`WorldGenSettings`] resource. A file that
/// cannot be read or fails validation stops the app.
pub fn load_settings(
    mut commands: Commands,
    source: Res<SettingsSource>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(path) = &source.0 else {
        info!("No settings file given, using defaults");
        commands.insert_resource(WorldGenSettings::default());
        return;
    };

    match WorldGenSettings::load(path) {
        Ok(settings) => {
            info!("Loaded settings from '{}'", path.display());
            commands.insert_resource(settings);
        }
        Err(e) => {
            error!("Failed to load settings '{}': {}", path.display(), e);
            exit.send(AppExit::error());
        }
    }
}
