//! Choropleth layer: triangulated country shapes with fills and labels

use egui::Color32;
use geo::{Area, BoundingRect, Contains, InteriorPoint, TriangulateEarcut};
use geo_types::{LineString, Point, Rect as GeoRect};
use rstar::{RTree, RTreeObject, AABB};
use tracing::{debug, warn};
use whr_core::{CountryId, Field};
use whr_data::Dataset;

use crate::colors::{ColorScale, NULL_GRAY};

/// Labels are shown for shapes larger than this share of the visible area
pub const LABEL_AREA_FRACTION: f64 = 0.0015;

/// One drawable country
#[derive(Debug, Clone)]
pub struct CountryShape {
    /// Index into [`Dataset::records`]
    pub record: usize,
    pub id: CountryId,
    /// Triangle vertices, longitude and latitude
    pub vertices: Vec<[f64; 2]>,
    /// Three indices into `vertices` per triangle
    pub indices: Vec<u32>,
    /// Exterior and interior rings for outlines
    pub rings: Vec<Vec<[f64; 2]>>,
    /// Interior point of the largest polygon
    pub anchor: Option<[f64; 2]>,
    /// Area of every polygon together, in square degrees
    pub area: f64,
    pub fill: Color32,
    /// Value label; None when the color field is missing
    pub label: Option<String>,
}

/// Bounding box entry of the spatial index
#[derive(Debug, Clone)]
struct ShapeEnvelope {
    shape: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for ShapeEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Every country with geometry, ready to paint
pub struct MapLayer {
    shapes: Vec<CountryShape>,
    index: RTree<ShapeEnvelope>,
    color_field: Field,
    color_scale: Option<ColorScale>,
}

impl MapLayer {
    /// Triangulate every record with geometry; records without are skipped
    pub fn new(dataset: &Dataset) -> Self {
        let mut shapes = Vec::new();
        let mut envelopes = Vec::new();

        for (record_idx, record) in dataset.records().iter().enumerate() {
            let Some(geometry) = &record.geometry else {
                continue;
            };
            let Some(bounds) = geometry.bounding_rect() else {
                warn!("Shape for {} is empty", record.id);
                continue;
            };

            let mut vertices = Vec::new();
            let mut indices = Vec::new();
            let mut rings = Vec::new();
            for polygon in &geometry.0 {
                let raw = polygon.earcut_triangles_raw();
                let offset = vertices.len() as u32;
                vertices.extend(raw.vertices.chunks_exact(2).map(|c| [c[0], c[1]]));
                indices.extend(raw.triangle_indices.iter().map(|&i| offset + i as u32));

                rings.push(ring_points(polygon.exterior()));
                rings.extend(polygon.interiors().iter().map(ring_points));
            }

            let largest = geometry
                .0
                .iter()
                .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()));
            let anchor = largest
                .and_then(|polygon| polygon.interior_point())
                .map(|p| [p.x(), p.y()]);
            let area = geometry.unsigned_area();

            envelopes.push(ShapeEnvelope {
                shape: shapes.len(),
                envelope: AABB::from_corners(
                    [bounds.min().x, bounds.min().y],
                    [bounds.max().x, bounds.max().y],
                ),
            });
            shapes.push(CountryShape {
                record: record_idx,
                id: record.id.clone(),
                vertices,
                indices,
                rings,
                anchor,
                area,
                fill: NULL_GRAY,
                label: None,
            });
        }

        debug!("Triangulated {} country shapes", shapes.len());
        Self {
            shapes,
            index: RTree::bulk_load(envelopes),
            color_field: Field::LadderScore,
            color_scale: None,
        }
    }

    /// Recolor every shape by a field
    ///
    /// The scale domain covers the non-missing values only; shapes whose
    /// record lacks the field are filled gray and get no label.
    pub fn render(&mut self, dataset: &Dataset, color_field: Field) {
        let records = dataset.records();
        self.color_field = color_field;
        self.color_scale = dataset
            .value_range(color_field)
            .map(|(min, max)| ColorScale { min, max });

        for shape in &mut self.shapes {
            let value = records.get(shape.record).and_then(|r| r.value(color_field));
            shape.fill = match &self.color_scale {
                Some(scale) => scale.color(value),
                None => NULL_GRAY,
            };
            shape.label = value.map(|v| format!("{:.2}", v));
        }
    }

    pub fn shapes(&self) -> &[CountryShape] {
        &self.shapes
    }

    pub fn shape(&self, id: &CountryId) -> Option<&CountryShape> {
        self.shapes.iter().find(|shape| &shape.id == id)
    }

    pub fn color_field(&self) -> Field {
        self.color_field
    }

    pub fn color_scale(&self) -> Option<&ColorScale> {
        self.color_scale.as_ref()
    }

    /// Shape containing a longitude/latitude point
    ///
    /// Bounding boxes narrow the candidates, exact point-in-polygon decides.
    pub fn hit(&self, dataset: &Dataset, point: [f64; 2]) -> Option<&CountryShape> {
        let target = Point::new(point[0], point[1]);
        self.index
            .locate_in_envelope_intersecting(&AABB::from_point(point))
            .map(|entry| &self.shapes[entry.shape])
            .find(|shape| {
                dataset
                    .records()
                    .get(shape.record)
                    .and_then(|record| record.geometry.as_ref())
                    .map_or(false, |geometry| geometry.contains(&target))
            })
    }
}

fn ring_points(ring: &LineString<f64>) -> Vec<[f64; 2]> {
    ring.coords().map(|c| [c.x, c.y]).collect()
}

/// Whether a shape's label fits the current view
///
/// The anchor must be on screen and the whole country, islands included,
/// must cover enough of the visible area.
pub fn label_visible(shape: &CountryShape, visible: &GeoRect<f64>) -> bool {
    let Some([x, y]) = shape.anchor else {
        return false;
    };
    let inside = x >= visible.min().x && x <= visible.max().x && y >= visible.min().y && y <= visible.max().y;
    inside && shape.area > LABEL_AREA_FRACTION * visible.width() * visible.height()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{coord, polygon, MultiPolygon};
    use whr_data::CountryRecord;

    fn square(x: f64, y: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x, y: y),
            (x: x + size, y: y),
            (x: x + size, y: y + size),
            (x: x, y: y + size),
        ]])
    }

    fn record(code: &str, geometry: Option<MultiPolygon<f64>>, score: Option<f64>) -> CountryRecord {
        CountryRecord {
            id: CountryId::new(code),
            name: code.to_string(),
            geometry,
            values: score.map(|s| (Field::LadderScore, s)).into_iter().collect(),
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record("FIN", Some(square(20.0, 60.0, 10.0)), Some(7.8)),
            record("AFG", Some(square(60.0, 30.0, 8.0)), Some(1.9)),
            record("ATA", Some(square(-60.0, -80.0, 20.0)), None),
            record("SGP", None, Some(6.6)),
        ])
    }

    #[test]
    fn test_records_without_geometry_are_not_drawn() {
        let layer = MapLayer::new(&dataset());
        assert_eq!(layer.shapes().len(), 3);
        assert!(layer.shape(&CountryId::new("SGP")).is_none());
    }

    #[test]
    fn test_null_values_render_gray() {
        let dataset = dataset();
        let mut layer = MapLayer::new(&dataset);
        layer.render(&dataset, Field::LadderScore);

        let ata = layer.shape(&CountryId::new("ATA")).unwrap();
        assert_eq!(ata.fill, NULL_GRAY);
        assert!(ata.label.is_none());

        let fin = layer.shape(&CountryId::new("FIN")).unwrap();
        assert_ne!(fin.fill, NULL_GRAY);
        assert_eq!(fin.label.as_deref(), Some("7.80"));
    }

    #[test]
    fn test_color_domain_ignores_nulls() {
        let dataset = dataset();
        let mut layer = MapLayer::new(&dataset);
        layer.render(&dataset, Field::LadderScore);
        assert_eq!(layer.color_scale(), Some(&ColorScale { min: 1.9, max: 7.8 }));

        layer.render(&dataset, Field::Generosity);
        assert!(layer.color_scale().is_none());
        assert!(layer.shapes().iter().all(|s| s.fill == NULL_GRAY));
    }

    #[test]
    fn test_triangulation_covers_square() {
        let layer = MapLayer::new(&dataset());
        let fin = layer.shape(&CountryId::new("FIN")).unwrap();
        assert_eq!(fin.indices.len(), 6);
        assert_eq!(fin.rings.len(), 1);
    }

    #[test]
    fn test_hit_uses_exact_containment() {
        let dataset = dataset();
        let layer = MapLayer::new(&dataset);
        assert_eq!(layer.hit(&dataset, [25.0, 65.0]).map(|s| &s.id), Some(&CountryId::new("FIN")));
        assert!(layer.hit(&dataset, [0.0, 0.0]).is_none());
    }

    #[test]
    fn test_label_threshold() {
        let layer = MapLayer::new(&dataset());
        let fin = layer.shape(&CountryId::new("FIN")).unwrap();
        assert_eq!(fin.area, 100.0);

        let world = GeoRect::new(coord! { x: -180.0, y: -90.0 }, coord! { x: 180.0, y: 90.0 });
        assert!(label_visible(fin, &world));

        let huge = GeoRect::new(coord! { x: -1800.0, y: -900.0 }, coord! { x: 1800.0, y: 900.0 });
        assert!(!label_visible(fin, &huge));

        let elsewhere = GeoRect::new(coord! { x: -100.0, y: -50.0 }, coord! { x: -90.0, y: -40.0 });
        assert!(!label_visible(fin, &elsewhere));
    }

    #[test]
    fn test_label_threshold_counts_every_island() {
        // Ten 2x2 islands: 40 square degrees in total, 4 in the largest
        let islands = MultiPolygon(
            (0..10)
                .flat_map(|i| square(100.0 + 3.0 * i as f64, -5.0, 2.0).0)
                .collect(),
        );
        let dataset = Dataset::from_records(vec![record("IDN", Some(islands), Some(5.3))]);
        let layer = MapLayer::new(&dataset);
        let idn = layer.shape(&CountryId::new("IDN")).unwrap();
        assert_eq!(idn.area, 40.0);
        assert_eq!(idn.rings.len(), 10);

        // Threshold is 0.15% of 200x100, i.e. 30
        let view = GeoRect::new(coord! { x: 20.0, y: -55.0 }, coord! { x: 220.0, y: 45.0 });
        assert!(label_visible(idn, &view));
    }
}
