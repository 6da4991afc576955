//! Texture loading boundary.
//!
//! The scene is never composed until every texture the catalog declares has
//! loaded.  While textures are in flight the app sits in [`AppPhase::Loading`]
//! with a placeholder on screen; a single failed texture moves it to
//! [`AppPhase::Failed`], where the error screen offers a reload.  Nothing past
//! this boundary ever sees a missing handle.

use crate::body::BodyTextures;
use crate::catalog::Catalog;
use crate::error::SceneError;
use bevy::asset::LoadState;
use bevy::prelude::*;
use std::collections::HashMap;

/// Top-level application phase.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppPhase {
    /// Textures requested, not all resolved yet.
    #[default]
    Loading,
    /// Scene composed and interactive.
    Running,
    /// A texture failed; the error screen is up.
    Failed,
}

/// Every texture the scene asked for, grouped per body.
#[derive(Resource, Debug, Clone, Default)]
pub struct SceneTextures {
    bodies: HashMap<&'static str, BodyTextures>,
    requested: Vec<(&'static str, Handle<Image>)>,
}

impl SceneTextures {
    /// Request every declared texture of every catalog body.  Paths shared
    /// between bodies are requested once.
    pub fn request(catalog: &Catalog, mut load: impl FnMut(&'static str) -> Handle<Image>) -> Self {
        let mut requested: Vec<(&'static str, Handle<Image>)> = Vec::new();
        let mut handle_for = |path: &'static str| -> Handle<Image> {
            if let Some((_, handle)) = requested.iter().find(|(p, _)| *p == path) {
                return handle.clone();
            }
            let handle = load(path);
            requested.push((path, handle.clone()));
            handle
        };

        let bodies = catalog
            .iter()
            .map(|body| {
                let textures = BodyTextures {
                    surface: Some(handle_for(body.texture)),
                    clouds: body.cloud_texture.map(&mut handle_for),
                    ring: body.ring_texture.map(&mut handle_for),
                };
                (body.id, textures)
            })
            .collect();

        Self { bodies, requested }
    }

    /// Default handles for every declared texture, without touching an asset
    /// server.  Lets headless apps compose the scene with every optional
    /// layer present.
    pub fn placeholder(catalog: &Catalog) -> Self {
        Self::request(catalog, |_| Handle::default())
    }

    /// Handles for one body.  Unknown ids get no textures.
    pub fn for_body(&self, id: &str) -> BodyTextures {
        self.bodies.get(id).cloned().unwrap_or_default()
    }

    /// Every requested `(path, handle)` pair, in request order.
    pub fn requested(&self) -> &[(&'static str, Handle<Image>)] {
        &self.requested
    }
}

/// The failure that put the app into [`AppPhase::Failed`].
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AssetFailure(pub SceneError);

/// The user pressed "Reload" on the error screen.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ReloadRequested;

/// Per-texture status as far as the scene cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureStatus {
    Pending,
    Loaded,
    Failed(String),
}

impl From<Option<LoadState>> for TextureStatus {
    fn from(state: Option<LoadState>) -> Self {
        match state {
            Some(LoadState::Loaded) => TextureStatus::Loaded,
            Some(LoadState::Failed(err)) => TextureStatus::Failed(err.to_string()),
            _ => TextureStatus::Pending,
        }
    }
}

/// Overall progress of a texture batch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadProgress {
    Pending { loaded: usize, total: usize },
    Ready,
    Failed(SceneError),
}

/// Fold per-path statuses into one verdict.  Any failure wins over pending
/// textures; the first failure in order is the one reported.
pub fn summarize<'a, I>(statuses: I) -> LoadProgress
where
    I: IntoIterator<Item = (&'a str, TextureStatus)>,
{
    let mut loaded = 0;
    let mut total = 0;
    for (path, status) in statuses {
        total += 1;
        match status {
            TextureStatus::Loaded => loaded += 1,
            TextureStatus::Pending => {}
            TextureStatus::Failed(reason) => {
                return LoadProgress::Failed(SceneError::AssetLoad {
                    path: path.to_string(),
                    reason,
                })
            }
        }
    }
    if loaded == total {
        LoadProgress::Ready
    } else {
        LoadProgress::Pending { loaded, total }
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// `OnEnter(Loading)`: ask the asset server for every catalog texture.
pub fn request_textures_system(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    catalog: Res<Catalog>,
) {
    let textures = SceneTextures::request(&catalog, |path| asset_server.load(path));
    info!("[assets] Requested {} textures", textures.requested().len());
    commands.insert_resource(textures);
}

/// Watch load states and leave `Loading` once the batch resolves.
pub fn poll_textures_system(
    mut commands: Commands,
    mut last: Local<Option<(usize, usize)>>,
    asset_server: Res<AssetServer>,
    textures: Option<Res<SceneTextures>>,
    mut next: ResMut<NextState<AppPhase>>,
) {
    let Some(textures) = textures else {
        return;
    };
    let progress = summarize(textures.requested().iter().map(|(path, handle)| {
        (*path, TextureStatus::from(asset_server.get_load_state(handle.id())))
    }));

    match progress {
        LoadProgress::Ready => {
            info!("[assets] All textures loaded");
            next.set(AppPhase::Running);
        }
        LoadProgress::Failed(err) => {
            error!("[assets] {err}");
            commands.insert_resource(AssetFailure(err));
            next.set(AppPhase::Failed);
        }
        LoadProgress::Pending { loaded, total } => {
            if *last != Some((loaded, total)) {
                *last = Some((loaded, total));
                debug!("[assets] {loaded}/{total} textures loaded");
            }
        }
    }
}

/// Reload from the error screen: drop every handle, ask the asset server to
/// retry the failed path, and start loading from scratch.
pub fn reload_system(
    mut commands: Commands,
    mut reloads: MessageReader<ReloadRequested>,
    asset_server: Res<AssetServer>,
    failure: Option<Res<AssetFailure>>,
    mut next: ResMut<NextState<AppPhase>>,
) {
    if reloads.read().count() == 0 {
        return;
    }
    if let Some(AssetFailure(SceneError::AssetLoad { path, .. })) = failure.as_deref() {
        asset_server.reload(path.clone());
    }
    commands.remove_resource::<SceneTextures>();
    commands.remove_resource::<AssetFailure>();
    info!("[assets] Reloading");
    next.set(AppPhase::Loading);
}

/// Texture loading and the Loading/Running/Failed phase machine.
pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppPhase>()
            .add_message::<ReloadRequested>()
            .add_systems(OnEnter(AppPhase::Loading), request_textures_system)
            .add_systems(
                Update,
                (
                    poll_textures_system.run_if(in_state(AppPhase::Loading)),
                    reload_system.run_if(in_state(AppPhase::Failed)),
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_loaded_is_ready() {
        let progress = summarize([
            ("a.jpg", TextureStatus::Loaded),
            ("b.jpg", TextureStatus::Loaded),
        ]);
        assert_eq!(progress, LoadProgress::Ready);
    }

    #[test]
    fn pending_counts_loaded_textures() {
        let progress = summarize([
            ("a.jpg", TextureStatus::Loaded),
            ("b.jpg", TextureStatus::Pending),
            ("c.jpg", TextureStatus::Pending),
        ]);
        assert_eq!(progress, LoadProgress::Pending { loaded: 1, total: 3 });
    }

    #[test]
    fn failure_beats_pending_and_names_the_path() {
        let progress = summarize([
            ("a.jpg", TextureStatus::Pending),
            ("b.jpg", TextureStatus::Failed("not found".into())),
            ("c.jpg", TextureStatus::Failed("corrupt".into())),
        ]);
        assert_eq!(
            progress,
            LoadProgress::Failed(SceneError::AssetLoad {
                path: "b.jpg".into(),
                reason: "not found".into(),
            })
        );
    }

    #[test]
    fn request_dedupes_paths_and_covers_every_layer() {
        let catalog = Catalog::default();
        let mut calls = 0;
        let textures = SceneTextures::request(&catalog, |_| {
            calls += 1;
            Handle::default()
        });

        let declared: usize = catalog.iter().map(|b| b.texture_paths().count()).sum();
        assert_eq!(textures.requested().len(), calls);
        assert!(calls <= declared);

        let earth = textures.for_body("earth");
        assert!(earth.surface.is_some());
        assert!(earth.clouds.is_some());
        assert!(earth.ring.is_none());

        let saturn = textures.for_body("saturn");
        assert!(saturn.ring.is_some());
        assert!(saturn.clouds.is_none());
    }

    #[test]
    fn unknown_body_gets_no_textures() {
        let textures = SceneTextures::placeholder(&Catalog::default());
        let none = textures.for_body("pluto");
        assert!(none.surface.is_none() && none.clouds.is_none() && none.ring.is_none());
    }
}
