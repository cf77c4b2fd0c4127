pub const MANIFEST_PATH: &str = "explorer/scene.manifest.json";
pub const DEFAULT_DATASET_PATH: &str = "explorer/points.dataset.json";
pub const DEFAULT_MESH_PATH: &str = "explorer/reference.glb";
pub const POINT_SHADER_PATH: &str = "shaders/point_cloud.wgsl";
