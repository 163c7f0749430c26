use bevy::log::LogPlugin;
use bevy::prelude::*;

mod settings;
mod world;

use settings::{load_settings, SettingsSource};
use world::{exit_when_generated, generate_world};

fn main() -> AppExit {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        LogPlugin::default(),
        AssetPlugin::default(),
    ))
    .init_asset::<Mesh>()
    .insert_resource(SettingsSource::from_env())
    .add_systems(
        Startup,
        (load_settings, generate_world, exit_when_generated).chain(),
    );

    app.run()
}
