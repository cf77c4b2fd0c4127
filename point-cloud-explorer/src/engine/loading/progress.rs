use bevy::prelude::*;

/// User-facing loading status, mirrored to the frontend and native overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingStatus {
    #[default]
    LoadingData,
    LoadingDataset,
    LoadingReferenceMesh,
    DataError,
    ReferenceMeshFallback,
    Ready,
}

impl LoadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoadingData => "LOADING DATA...",
            Self::LoadingDataset => "LOADING JSON DATA...",
            Self::LoadingReferenceMesh => "LOADING GLB MODEL...",
            Self::DataError => "ERROR LOADING DATA. PLEASE RELOAD.",
            Self::ReferenceMeshFallback => {
                "ERROR LOADING GLB MODEL. CONTINUING WITH PARTICLES ONLY..."
            }
            Self::Ready => "",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::DataError | Self::ReferenceMeshFallback)
    }
}

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub manifest_resolved: bool,
    pub dataset_settled: bool,
    pub mesh_settled: bool,
    pub point_cloud_created: bool,
    pub(crate) status: LoadingStatus,
}

impl LoadingProgress {
    /// Dataset and reference mesh have each loaded or failed.
    pub fn content_settled(&self) -> bool {
        self.manifest_resolved && self.dataset_settled && self.mesh_settled
    }

    pub fn status(&self) -> LoadingStatus {
        self.status
    }

    /// Record a new status. A dataset error stays visible once reported.
    pub fn report(&mut self, status: LoadingStatus) {
        if self.status != LoadingStatus::DataError {
            self.status = status;
        }
    }
}
