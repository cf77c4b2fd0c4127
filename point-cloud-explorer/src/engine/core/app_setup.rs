use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::camera::{FAR_PLANE, NEAR_PLANE};

use crate::engine::animation::clock::{AnimationClock, advance_animation_clock};
use crate::engine::assets::dataset::{CategoryFilter, Dataset, DatasetRecords};
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::camera::rig::{CameraRig, ExplorerCamera};
use crate::engine::core::app_state::{
    AppState, FpsText, StatusText, transition_to_running, update_loading_frontend,
};
use crate::engine::core::config::ExplorerConfig;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::dataset_loader::{DatasetLoader, load_dataset_system};
use crate::engine::loading::manifest_loader::{ManifestLoader, resolve_manifest_system, start_loading};
use crate::engine::loading::mesh_loader::{ReferenceMeshLoader, load_reference_mesh_system};
use crate::engine::loading::point_cloud_creator::create_point_cloud_when_ready;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::picking::proxy_index::PickProxyIndex;
use crate::engine::shaders::PointCloudMaterial;
use crate::engine::systems::explorer_commands::{
    ExplorerCommand, handle_explorer_commands, handle_explorer_keyboard_shortcuts,
};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::frame_loop::{
    ExplorerSet, advance_camera_rig, apply_camera_transform, refresh_pick_proxies, sync_tour_ui,
    update_hover, update_point_material,
};
use crate::engine::systems::notifications::publish_ui_changes;
use crate::engine::systems::pointer_input::{
    PointerTracker, handle_pointer_input, handle_wheel_input,
};
use crate::engine::systems::ui_state::ExplorerUiState;
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{fps_text_update_system, status_text_update_system};

pub fn create_app() -> App {
    let mut app = App::new();
    let config = ExplorerConfig::default();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(MaterialPlugin::<PointCloudMaterial>::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers the manifest and dataset as loadable assets from JSON files.
        .add_plugins(JsonAssetPlugin::<SceneManifest>::new(&["manifest.json"]))
        .add_plugins(JsonAssetPlugin::<DatasetRecords>::new(&["dataset.json"]))
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.insert_resource(CameraRig::new(&config))
        .insert_resource(config)
        .insert_resource(ClearColor(Color::BLACK))
        .init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<DatasetLoader>()
        .init_resource::<ReferenceMeshLoader>()
        .init_resource::<Dataset>()
        .init_resource::<CategoryFilter>()
        .init_resource::<PickProxyIndex>()
        .init_resource::<AnimationClock>()
        .init_resource::<PointerTracker>()
        .init_resource::<ExplorerUiState>()
        .add_event::<ExplorerCommand>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                resolve_manifest_system,
                load_dataset_system,
                load_reference_mesh_system,
                create_point_cloud_when_ready,
                transition_to_running,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(Update, update_loading_frontend);

    app.configure_sets(
        Update,
        (
            ExplorerSet::Input,
            ExplorerSet::Animate,
            ExplorerSet::Pick,
            ExplorerSet::Present,
        )
            .chain()
            .run_if(in_state(AppState::Running)),
    )
    .add_systems(
        Update,
        (
            handle_explorer_keyboard_shortcuts, // Native shortcuts or no-op for WASM
            handle_explorer_commands,
            handle_pointer_input,
            handle_wheel_input,
        )
            .chain()
            .in_set(ExplorerSet::Input),
    )
    .add_systems(
        Update,
        (advance_animation_clock, advance_camera_rig)
            .chain()
            .in_set(ExplorerSet::Animate),
    )
    .add_systems(
        Update,
        (refresh_pick_proxies, update_hover)
            .chain()
            .in_set(ExplorerSet::Pick),
    )
    .add_systems(
        Update,
        (
            sync_tour_ui,
            apply_camera_transform,
            update_point_material,
            publish_ui_changes,
            fps_notification_system,
        )
            .chain()
            .in_set(ExplorerSet::Present),
    );

    // Overlay text only exists on native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, (fps_text_update_system, status_text_update_system));
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

fn spawn_explorer_camera(commands: &mut Commands, rig: &CameraRig) {
    let settings = rig.controller().settings();
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        rig.controller().transform(),
        ExplorerCamera,
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, rig: Res<CameraRig>) {
    spawn_lighting(&mut commands);
    spawn_explorer_camera(&mut commands, &rig);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
