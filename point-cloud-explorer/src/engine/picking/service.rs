use bevy::prelude::*;

use crate::engine::assets::dataset::{CategoryFilter, Dataset};
use crate::engine::camera::rig::CameraRig;
use crate::engine::picking::proxy_index::{PickHit, PickProxyIndex};

/// Resolve the data point under `cursor`, or `None`.
///
/// Picking is suppressed while a drag or pan is held or the tour is active, and
/// points outside the category filter cannot be picked.
pub fn pick_at(
    rig: &CameraRig,
    proxies: &PickProxyIndex,
    dataset: &Dataset,
    filter: &CategoryFilter,
    cursor: Vec2,
    viewport: Vec2,
) -> Option<PickHit> {
    if rig.is_interacting() || rig.tour().is_active() || proxies.is_empty() {
        return None;
    }

    let ray = rig.controller().screen_ray(cursor, viewport)?;
    proxies.cast(ray, |index| {
        dataset
            .get(index)
            .is_some_and(|point| filter.matches(&point.category))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::bounds::BoundingRegion;
    use crate::engine::assets::dataset::DataPoint;
    use crate::engine::core::config::ExplorerConfig;
    use crate::engine::picking::proxy_index::ProxyTracking;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
    const CENTER: Vec2 = Vec2::new(400.0, 300.0);

    fn point(x: f32, category: &str) -> DataPoint {
        DataPoint {
            position: Vec3::new(x, 0.0, 0.0),
            category: category.to_string(),
            sub_category: String::new(),
            title: format!("point at {x}"),
            keywords: Vec::new(),
        }
    }

    /// Three points on the x axis, camera 20 units down +Z from (5, 0, 0).
    fn scene() -> (CameraRig, PickProxyIndex, Dataset) {
        let dataset = Dataset::from_points(vec![
            point(0.0, "Civil"),
            point(5.0, "Penal"),
            point(10.0, "Civil"),
        ]);

        let mut proxies = PickProxyIndex::default();
        proxies.rebuild(dataset.points(), 1.2);
        proxies.refresh(0.0, ProxyTracking::Rest);

        // Unit cube around (5, 0, 0) framed at 20x its extent from the
        // initial azimuth 0, polar pi/2 orbit puts the eye at (5, 0, 20).
        let target = Vec3::new(5.0, 0.0, 0.0);
        let mut rig = CameraRig::new(&ExplorerConfig::default());
        rig.focus_region(
            &BoundingRegion::new(target - Vec3::splat(0.5), target + Vec3::splat(0.5)),
            20.0,
        )
        .unwrap();

        (rig, proxies, dataset)
    }

    #[test]
    fn center_ray_picks_middle_point() {
        let (rig, proxies, dataset) = scene();
        assert!(rig.controller().position().distance(Vec3::new(5.0, 0.0, 20.0)) < 1e-3);

        let hit = pick_at(&rig, &proxies, &dataset, &CategoryFilter::default(), CENTER, VIEWPORT)
            .unwrap();
        assert_eq!(hit.data_point_index, 1);
        assert_eq!(dataset.get(hit.data_point_index).unwrap().position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn picking_is_idempotent() {
        let (rig, proxies, dataset) = scene();
        let filter = CategoryFilter::default();
        let cursor = Vec2::new(410.0, 297.0);

        let first = pick_at(&rig, &proxies, &dataset, &filter, cursor, VIEWPORT);
        for _ in 0..5 {
            assert_eq!(pick_at(&rig, &proxies, &dataset, &filter, cursor, VIEWPORT), first);
        }
    }

    #[test]
    fn empty_dataset_picks_nothing() {
        let (rig, _, _) = scene();
        let mut proxies = PickProxyIndex::default();
        proxies.rebuild(&[], 1.2);

        let hit = pick_at(
            &rig,
            &proxies,
            &Dataset::default(),
            &CategoryFilter::default(),
            CENTER,
            VIEWPORT,
        );
        assert!(hit.is_none());
        assert_eq!(proxies.capacity(), 0);
    }

    #[test]
    fn no_pick_while_dragging() {
        let (mut rig, proxies, dataset) = scene();
        rig.begin_drag(1.0);
        assert!(
            pick_at(&rig, &proxies, &dataset, &CategoryFilter::default(), CENTER, VIEWPORT)
                .is_none()
        );
    }

    #[test]
    fn no_pick_while_panning() {
        let (mut rig, proxies, dataset) = scene();
        rig.begin_pan(1.0);
        assert!(
            pick_at(&rig, &proxies, &dataset, &CategoryFilter::default(), CENTER, VIEWPORT)
                .is_none()
        );

        rig.end_pan(1.5);
        assert!(
            pick_at(&rig, &proxies, &dataset, &CategoryFilter::default(), CENTER, VIEWPORT)
                .is_some()
        );
    }

    #[test]
    fn no_pick_while_touring() {
        let (mut rig, proxies, dataset) = scene();
        assert!(rig.start_tour(1.0));
        assert!(
            pick_at(&rig, &proxies, &dataset, &CategoryFilter::default(), CENTER, VIEWPORT)
                .is_none()
        );
    }

    #[test]
    fn filtered_points_are_not_picked() {
        let (rig, proxies, dataset) = scene();
        let mut filter = CategoryFilter::default();
        filter.set(Some("Civil".to_string()));

        assert!(pick_at(&rig, &proxies, &dataset, &filter, CENTER, VIEWPORT).is_none());
    }
}
