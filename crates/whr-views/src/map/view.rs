//! Choropleth map space view

use std::sync::Arc;

use egui::epaint::Mesh;
use egui::{Align2, Color32, ComboBox, FontId, Painter, Pos2, Rect, Rounding, Sense, Shape, Stroke, Ui, Vec2};
use tracing::debug;
use whr_core::{AxisKind, Field, Selection, SelectionState, ViewId, ViewInvalidation};
use whr_data::CountryRecord;

use super::layer::{label_visible, CountryShape, MapLayer};
use super::projection::{GeoTransform, Projection};
use crate::colors::{HOVER_DARK, SELECTED_RED};
use crate::legend::draw_color_bar;
use crate::tooltip::tooltip_text;
use crate::{SpaceView, ViewerContext};

const OCEAN: Color32 = Color32::from_rgb(225, 236, 246);
const BORDER: Color32 = Color32::from_rgb(120, 120, 120);
const LEGEND_WIDTH: f32 = 150.0;
const SCROLL_ZOOM_SPEED: f64 = 1.0 / 200.0;

/// World map shaded by one field
pub struct MapView {
    title: String,
    invalidation: Arc<ViewInvalidation>,
    layer: Option<MapLayer>,
    transform: GeoTransform,
    selection: Selection,
    /// Index into the layer's shapes
    hovered: Option<usize>,
}

impl MapView {
    pub fn new(selection: &SelectionState) -> Self {
        let invalidation = ViewInvalidation::new();
        selection.subscribe(ViewId::Map, invalidation.clone());

        Self {
            title: ViewId::Map.label().to_string(),
            invalidation,
            layer: None,
            transform: GeoTransform::default(),
            selection: Selection::None,
            hovered: None,
        }
    }

    pub fn layer(&self) -> Option<&MapLayer> {
        self.layer.as_ref()
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// Build the shapes once and recolor them by a field
    pub fn render(&mut self, ctx: &ViewerContext, color_field: Field) {
        let layer = self.layer.get_or_insert_with(|| MapLayer::new(&ctx.dataset));
        debug!(?color_field, "Coloring map");
        layer.render(&ctx.dataset, color_field);
    }

    /// Apply pending notifications
    pub fn refresh(&mut self, ctx: &ViewerContext) {
        if self.invalidation.take_layout() || self.layer.is_none() {
            let color = ctx.selection.view_fields(ViewId::Map).color;
            self.render(ctx, color);
        }
        if self.invalidation.take_highlight() {
            self.selection = ctx.selection.selection();
        }
    }

    /// Pick the field the map is shaded by
    pub fn set_color_field(&self, ctx: &ViewerContext, field: Field) {
        ctx.selection.set_view_field_typed(ViewId::Map, AxisKind::Color, field);
    }

    fn hit(&self, ctx: &ViewerContext, projection: &Projection, pos: Pos2) -> Option<usize> {
        let layer = self.layer.as_ref()?;
        let shape = layer.hit(&ctx.dataset, projection.to_geo(pos))?;
        layer.shapes().iter().position(|s| s.id == shape.id)
    }

    /// Record of the country under the cursor, if any
    pub fn on_hover<'a>(
        &mut self,
        ctx: &'a ViewerContext,
        projection: &Projection,
        pos: Pos2,
    ) -> Option<&'a CountryRecord> {
        self.hovered = self.hit(ctx, projection, pos);
        let record = self
            .hovered
            .and_then(|idx| self.layer.as_ref()?.shapes().get(idx))
            .map(|shape| shape.record)?;
        ctx.dataset.records().get(record)
    }

    /// Toggle the country under the cursor; clicking sea or a gap clears
    pub fn on_click(&mut self, ctx: &ViewerContext, projection: &Projection, pos: Pos2) {
        let id = self
            .hit(ctx, projection, pos)
            .and_then(|idx| self.layer.as_ref()?.shapes().get(idx))
            .map(|shape| shape.id.clone());

        match id {
            Some(id) => ctx.selection.toggle(id),
            None => ctx.selection.clear(),
        }
    }

    fn controls_ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        let current = ctx.selection.view_fields(ViewId::Map).color;
        let mut chosen = current;

        ui.horizontal(|ui| {
            ui.label("Color by");
            ComboBox::from_id_source("map_color_field")
                .selected_text(chosen.label())
                .show_ui(ui, |ui| {
                    for field in Field::ALL {
                        ui.selectable_value(&mut chosen, field, field.label());
                    }
                });
            ui.separator();
            ui.label(format!("Zoom: {:.1}x", self.transform.zoom));
            if ui.button("Reset View").clicked() {
                self.transform.reset();
            }
        });

        if chosen != current {
            self.set_color_field(ctx, chosen);
        }
    }

    fn paint_shape_fill(painter: &Painter, projection: &Projection, shape: &CountryShape) {
        let mut mesh = Mesh::default();
        for &[lon, lat] in &shape.vertices {
            mesh.colored_vertex(projection.to_screen(lon, lat), shape.fill);
        }
        for triangle in shape.indices.chunks_exact(3) {
            mesh.add_triangle(triangle[0], triangle[1], triangle[2]);
        }
        painter.add(Shape::mesh(mesh));
    }

    fn paint_outline(painter: &Painter, projection: &Projection, shape: &CountryShape, stroke: Stroke) {
        for ring in &shape.rings {
            let points: Vec<Pos2> = ring
                .iter()
                .map(|&[lon, lat]| projection.to_screen(lon, lat))
                .collect();
            if points.len() > 2 {
                painter.add(Shape::line(points, stroke));
            }
        }
    }

    fn paint(&self, painter: &Painter, projection: &Projection) {
        let Some(layer) = self.layer.as_ref() else {
            return;
        };
        let map = painter.with_clip_rect(projection.rect);
        map.rect_filled(projection.rect, Rounding::ZERO, OCEAN);

        let visible = projection.visible_bounds();
        let border = Stroke::new(0.5, BORDER);

        for shape in layer.shapes() {
            Self::paint_shape_fill(&map, projection, shape);
            Self::paint_outline(&map, projection, shape, border);
        }

        // Highlights on top of every fill
        if let Some(shape) = self.hovered.and_then(|idx| layer.shapes().get(idx)) {
            Self::paint_outline(&map, projection, shape, Stroke::new(1.5, HOVER_DARK));
        }
        for shape in layer.shapes().iter().filter(|s| self.selection.contains(&s.id)) {
            Self::paint_outline(&map, projection, shape, Stroke::new(2.0, SELECTED_RED));
        }

        let font = FontId::proportional(10.0);
        for shape in layer.shapes() {
            let (Some(label), Some([lon, lat])) = (&shape.label, shape.anchor) else {
                continue;
            };
            if label_visible(shape, &visible) {
                map.text(projection.to_screen(lon, lat), Align2::CENTER_CENTER, label, font.clone(), Color32::BLACK);
            }
        }
    }
}

impl SpaceView for MapView {
    fn id(&self) -> ViewId {
        ViewId::Map
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        self.refresh(ctx);
        self.controls_ui(ctx, ui);
        self.refresh(ctx);

        let (outer, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let map_rect = Rect::from_min_max(outer.min, outer.max - Vec2::new(LEGEND_WIDTH, 0.0));
        if map_rect.width() < 20.0 || map_rect.height() < 20.0 {
            return;
        }

        // Zoom and pan
        if response.hovered() {
            let scroll = ui.input(|i| i.scroll_delta.y) as f64;
            if scroll != 0.0 {
                if let Some(pos) = response.hover_pos() {
                    self.transform.zoom_at((scroll * SCROLL_ZOOM_SPEED).exp(), pos, map_rect);
                }
            }
        }
        if response.dragged() {
            self.transform.pan(response.drag_delta(), map_rect);
        }

        let projection = self.transform.projection(map_rect);

        let hovered_record = match response.hover_pos() {
            Some(pos) if map_rect.contains(pos) => self.on_hover(ctx, &projection, pos),
            _ => {
                self.hovered = None;
                None
            }
        };

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.on_click(ctx, &projection, pos);
            }
        }
        self.refresh(ctx);

        let text_color = ui.visuals().text_color();
        let painter = ui.painter_at(outer);
        self.paint(&painter, &projection);

        if let Some(layer) = self.layer.as_ref() {
            let bar = Rect::from_min_size(
                Pos2::new(map_rect.right() + 20.0, outer.top() + 40.0),
                Vec2::new(16.0, (outer.height() * 0.5).max(60.0)),
            );
            draw_color_bar(&painter, bar, layer.color_field(), layer.color_scale(), text_color);
        }

        if ctx.tooltips_enabled() {
            if let Some(record) = hovered_record {
                response.on_hover_text(tooltip_text(record));
            }
        }
    }
}
