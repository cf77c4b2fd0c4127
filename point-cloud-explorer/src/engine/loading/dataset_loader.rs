use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::dataset::{Dataset, DatasetRecords};
use crate::engine::error::LoadError;
use crate::engine::loading::progress::{LoadingProgress, LoadingStatus};

#[derive(Resource, Default)]
pub struct DatasetLoader {
    handle: Option<Handle<DatasetRecords>>,
    path: String,
}

impl DatasetLoader {
    pub fn start(&mut self, asset_server: &AssetServer, path: &str) {
        info!("[LOAD] dataset: {}", path);
        self.path = path.to_string();
        self.handle = Some(asset_server.load(path.to_string()));
    }
}

/// Install the loaded dataset, or an empty one if loading failed.
pub fn load_dataset_system(
    mut loading_progress: ResMut<LoadingProgress>,
    dataset_loader: Res<DatasetLoader>,
    records: Res<Assets<DatasetRecords>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    if !loading_progress.manifest_resolved || loading_progress.dataset_settled {
        return;
    }

    let Some(ref handle) = dataset_loader.handle else {
        return;
    };

    if let Some(DatasetRecords(loaded)) = records.get(handle) {
        let dataset = Dataset::from_records(loaded.clone());
        info!(
            "✓ Dataset loaded: {} points in {} categories",
            dataset.len(),
            dataset.category_counts().len()
        );
        commands.insert_resource(dataset);
    } else if let LoadState::Failed(error) = asset_server.load_state(handle.id()) {
        let error = LoadError::Dataset {
            path: dataset_loader.path.clone(),
            reason: error.to_string(),
        };
        warn!("[LOAD] {error}; continuing with an empty dataset");
        loading_progress.report(LoadingStatus::DataError);
        commands.insert_resource(Dataset::default());
    } else {
        return;
    }

    loading_progress.dataset_settled = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_common_assets::json::JsonAssetPlugin;

    fn loader_app(path: &str) -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            AssetPlugin::default(),
            JsonAssetPlugin::<DatasetRecords>::new(&["dataset.json"]),
        ))
        .insert_resource(LoadingProgress {
            manifest_resolved: true,
            ..default()
        })
        .init_resource::<DatasetLoader>()
        .add_systems(Update, load_dataset_system);

        let asset_server = app.world().resource::<AssetServer>().clone();
        app.world_mut()
            .resource_mut::<DatasetLoader>()
            .start(&asset_server, path);
        app
    }

    /// Loading is asynchronous, so frames are pumped until the loader settles.
    fn run_until_settled(app: &mut App) {
        for _ in 0..500 {
            app.update();
            if app.world().resource::<LoadingProgress>().dataset_settled {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        panic!("dataset never settled");
    }

    #[test]
    fn missing_dataset_installs_empty_dataset_and_reports_error() {
        let mut app = loader_app("explorer/missing.dataset.json");
        run_until_settled(&mut app);

        assert!(app.world().resource::<Dataset>().is_empty());
        assert_eq!(
            app.world().resource::<LoadingProgress>().status(),
            LoadingStatus::DataError
        );
    }

    #[test]
    fn bundled_dataset_loads() {
        let mut app = loader_app("explorer/points.dataset.json");
        run_until_settled(&mut app);

        assert_eq!(app.world().resource::<Dataset>().len(), 10);
        assert!(!app.world().resource::<LoadingProgress>().status().is_error());
    }
}
