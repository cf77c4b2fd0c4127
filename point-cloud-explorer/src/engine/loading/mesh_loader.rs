use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::{Gltf, GltfMesh};
use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;

use crate::engine::assets::bounds::BoundingRegion;
use crate::engine::error::LoadError;
use crate::engine::loading::progress::{LoadingProgress, LoadingStatus};

/// Marker for the spawned reference mesh scene.
#[derive(Component)]
pub struct ReferenceMesh;

#[derive(Resource, Default)]
pub struct ReferenceMeshLoader {
    handle: Option<Handle<Gltf>>,
    path: Option<String>,
    bounds: Option<BoundingRegion>,
}

impl ReferenceMeshLoader {
    /// Begin loading `path`; `None` means the scene has no reference mesh.
    pub fn start(&mut self, asset_server: &AssetServer, path: Option<&str>) {
        self.path = path.map(str::to_string);
        self.handle = path.map(|path| {
            info!("[LOAD] reference mesh: {}", path);
            asset_server.load(path.to_string())
        });
    }

    /// World bounds of the loaded mesh, once available.
    pub fn bounds(&self) -> Option<BoundingRegion> {
        self.bounds
    }
}

/// Spawn the reference mesh and record its bounds, or give up on it.
pub fn load_reference_mesh_system(
    mut loading_progress: ResMut<LoadingProgress>,
    mut mesh_loader: ResMut<ReferenceMeshLoader>,
    gltfs: Res<Assets<Gltf>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    meshes: Res<Assets<Mesh>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    if !loading_progress.manifest_resolved || loading_progress.mesh_settled {
        return;
    }

    let Some(handle) = mesh_loader.handle.clone() else {
        loading_progress.mesh_settled = true;
        return;
    };
    let path = mesh_loader.path.clone().unwrap_or_default();

    let root = asset_server.load_state(handle.id());
    let dependencies = asset_server.get_recursive_dependency_load_state(handle.id());
    match mesh_load_outcome(&root, dependencies.as_ref()) {
        MeshLoadOutcome::Pending => {
            loading_progress.report(LoadingStatus::LoadingReferenceMesh);
            return;
        }
        MeshLoadOutcome::Failed(reason) => {
            warn!("[LOAD] {}", LoadError::ReferenceMesh { path, reason });
            loading_progress.report(LoadingStatus::ReferenceMeshFallback);
            loading_progress.mesh_settled = true;
            return;
        }
        MeshLoadOutcome::Loaded => {}
    }

    let Some(gltf) = gltfs.get(&handle) else {
        return;
    };

    match gltf_bounds(gltf, &gltf_meshes, &meshes) {
        Some(bounds) => {
            info!("✓ Reference mesh loaded, bounds {:?}", bounds);
            mesh_loader.bounds = Some(bounds);
        }
        None => {
            warn!("[LOAD] {}", LoadError::EmptyReferenceMesh { path });
            loading_progress.report(LoadingStatus::ReferenceMeshFallback);
        }
    }

    if let Some(scene) = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
    {
        commands.spawn((SceneRoot(scene), ReferenceMesh));
    }

    loading_progress.mesh_settled = true;
}

#[derive(Debug, PartialEq)]
enum MeshLoadOutcome {
    Pending,
    Loaded,
    Failed(String),
}

/// A glTF whose root loads but whose dependencies fail never becomes
/// fully loaded, so a failed dependency counts as a failed mesh.
fn mesh_load_outcome(
    root: &LoadState,
    dependencies: Option<&RecursiveDependencyLoadState>,
) -> MeshLoadOutcome {
    if let LoadState::Failed(error) = root {
        return MeshLoadOutcome::Failed(error.to_string());
    }
    match dependencies {
        Some(RecursiveDependencyLoadState::Failed(error)) => {
            MeshLoadOutcome::Failed(error.to_string())
        }
        Some(RecursiveDependencyLoadState::Loaded) if matches!(root, LoadState::Loaded) => {
            MeshLoadOutcome::Loaded
        }
        _ => MeshLoadOutcome::Pending,
    }
}

/// Union of the local AABBs of every primitive in the glTF.
fn gltf_bounds(
    gltf: &Gltf,
    gltf_meshes: &Assets<GltfMesh>,
    meshes: &Assets<Mesh>,
) -> Option<BoundingRegion> {
    gltf.meshes
        .iter()
        .filter_map(|handle| gltf_meshes.get(handle))
        .flat_map(|gltf_mesh| gltf_mesh.primitives.iter())
        .filter_map(|primitive| meshes.get(&primitive.mesh))
        .filter_map(|mesh| mesh.compute_aabb())
        .map(|aabb| {
            BoundingRegion::new(
                Vec3::from(aabb.center - aabb.half_extents),
                Vec3::from(aabb.center + aabb.half_extents),
            )
        })
        .reduce(|a, b| a.union(&b))
}
