use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::assets::bounds::BoundingRegion;

/// One record of the dataset JSON as delivered by the data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub category: String,
    #[serde(rename = "subCategory")]
    pub sub_category: String,
    pub label: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Dataset JSON file registered as a Bevy asset (`*.dataset.json`).
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct DatasetRecords(pub Vec<DatasetRecord>);

/// A classified data item placed in the point cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub position: Vec3,
    pub category: String,
    pub sub_category: String,
    pub title: String,
    pub keywords: Vec<String>,
}

impl From<DatasetRecord> for DataPoint {
    fn from(record: DatasetRecord) -> Self {
        Self {
            position: Vec3::new(record.x, record.y, record.z),
            category: record.category,
            sub_category: record.sub_category,
            title: record.label,
            keywords: record.keywords,
        }
    }
}

/// Loaded data items. Immutable after loading; a point's identity is its index.
#[derive(Resource, Debug, Clone, Default)]
pub struct Dataset {
    points: Vec<DataPoint>,
    bounds: Option<BoundingRegion>,
    category_counts: BTreeMap<String, usize>,
}

impl Dataset {
    pub fn from_points(points: Vec<DataPoint>) -> Self {
        let bounds = BoundingRegion::from_points(points.iter().map(|p| p.position));

        let mut category_counts = BTreeMap::new();
        for point in &points {
            *category_counts.entry(point.category.clone()).or_insert(0) += 1;
        }

        Self {
            points,
            bounds,
            category_counts,
        }
    }

    pub fn from_records(records: Vec<DatasetRecord>) -> Self {
        Self::from_points(records.into_iter().map(DataPoint::from).collect())
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&DataPoint> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Region covering every point, `None` when the dataset is empty.
    pub fn bounds(&self) -> Option<BoundingRegion> {
        self.bounds
    }

    pub fn category_counts(&self) -> &BTreeMap<String, usize> {
        &self.category_counts
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.category_counts.contains_key(category)
    }

    /// Region covering the points of one category.
    pub fn category_bounds(&self, category: &str) -> Option<BoundingRegion> {
        BoundingRegion::from_points(
            self.points
                .iter()
                .filter(|p| p.category == category)
                .map(|p| p.position),
        )
    }
}

/// Active category filter. Points outside it are dimmed and cannot be picked.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    active: Option<String>,
}

impl CategoryFilter {
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn set(&mut self, category: Option<String>) {
        self.active = category;
    }

    pub fn matches(&self, category: &str) -> bool {
        self.active.as_deref().is_none_or(|active| active == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32, category: &str) -> DataPoint {
        DataPoint {
            position: Vec3::new(x, 0.0, 0.0),
            category: category.to_string(),
            sub_category: String::new(),
            title: format!("item {x}"),
            keywords: Vec::new(),
        }
    }

    #[test]
    fn records_parse_with_optional_keywords() {
        let json = r#"[
            {"x": 1.0, "y": 2.0, "z": 3.0, "category": "Civil",
             "subCategory": "Contratos", "label": "Compraventa"},
            {"x": 0.0, "y": 0.0, "z": 0.0, "category": "Penal",
             "subCategory": "Delitos", "label": "Hurto", "keywords": ["robo"]}
        ]"#;

        let DatasetRecords(records) = serde_json::from_str(json).unwrap();
        let dataset = Dataset::from_records(records);

        assert_eq!(dataset.len(), 2);
        let first = dataset.get(0).unwrap();
        assert_eq!(first.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(first.sub_category, "Contratos");
        assert_eq!(first.title, "Compraventa");
        assert!(first.keywords.is_empty());
        assert_eq!(dataset.get(1).unwrap().keywords, vec!["robo".to_string()]);
    }

    #[test]
    fn category_counts_are_tallied() {
        let dataset = Dataset::from_points(vec![
            point(0.0, "Civil"),
            point(1.0, "Penal"),
            point(2.0, "Civil"),
        ]);

        assert_eq!(dataset.category_counts().get("Civil"), Some(&2));
        assert_eq!(dataset.category_counts().get("Penal"), Some(&1));
        assert!(dataset.has_category("Penal"));
        assert!(!dataset.has_category("Laboral"));
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert!(dataset.bounds().is_none());
        assert!(dataset.category_counts().is_empty());
    }

    #[test]
    fn category_bounds_only_cover_that_category() {
        let dataset = Dataset::from_points(vec![
            point(0.0, "Civil"),
            point(10.0, "Penal"),
            point(4.0, "Civil"),
        ]);

        let civil = dataset.category_bounds("Civil").unwrap();
        assert_eq!(civil.min.x, 0.0);
        assert_eq!(civil.max.x, 4.0);
        assert!(dataset.category_bounds("Laboral").is_none());
    }

    #[test]
    fn filter_matches_everything_when_inactive() {
        let mut filter = CategoryFilter::default();
        assert!(filter.matches("Civil"));

        filter.set(Some("Penal".to_string()));
        assert!(filter.matches("Penal"));
        assert!(!filter.matches("Civil"));
    }
}
