use bevy::prelude::*;
use bevy::window::WindowResolution;
use solar_explorer::SolarSystemPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Solar Explorer".into(),
            resolution: WindowResolution::new(1280, 720),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::BLACK))
    // SceneConfig is inserted with compiled defaults; load_scene_config
    // overwrites it from assets/scene.toml (if present) during Startup.
    .add_plugins(SolarSystemPlugin);

    app.run();
}
