//! The map view component: one map, a drawing mode, the last drawn feature
//! and the measurement text derived from it.

use crate::compact::CompactFormatter;
use crate::config::MapConfig;
use crate::draw::Draw;
use crate::map::{InteractionHandle, Layer, Map, MapTarget};
use crate::measure::{Measurement, measure};
use crate::mode::DrawMode;
use crate::source::{FeatureId, FeatureSource, SharedSource};

pub struct MapViewState {
    config: MapConfig,
    formatter: CompactFormatter,
    map: Option<Map>,
    source: SharedSource,
    mode: DrawMode,
    current: Option<InteractionHandle>,
    last_drawn: Option<FeatureId>,
    measurement: String,
}

impl Default for MapViewState {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

impl MapViewState {
    pub fn new(config: MapConfig) -> Self {
        MapViewState {
            formatter: CompactFormatter::new(config.number_format.clone()),
            mode: config.initial_mode,
            config,
            map: None,
            source: FeatureSource::shared(),
            current: None,
            last_drawn: None,
            measurement: String::new(),
        }
    }

    pub fn map(&self) -> Option<&Map> {
        self.map.as_ref()
    }

    pub fn map_mut(&mut self) -> Option<&mut Map> {
        self.map.as_mut()
    }

    pub fn source(&self) -> &SharedSource {
        &self.source
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn last_drawn(&self) -> Option<FeatureId> {
        self.last_drawn
    }

    pub fn is_mounted(&self) -> bool {
        self.map.is_some()
    }

    /// Build the map on `target` with the configured view, a basemap and a
    /// vector layer over the drawing source, then bind the current mode.
    pub fn mount(&mut self, target: Box<dyn MapTarget>) {
        if self.map.is_some() {
            self.unmount();
        }
        let layers = vec![
            Layer::Tile(self.config.tile_source()),
            Layer::Vector(self.source.clone()),
        ];
        self.map = Some(Map::new(self.config.view(), layers, target));
        log::info!(
            "map mounted at {:?}, zoom {}",
            self.config.center,
            self.config.zoom
        );
        self.bind_interaction();
    }

    /// Release the interaction and detach the map from its target.
    pub fn unmount(&mut self) {
        self.current = None;
        if let Some(mut map) = self.map.take()
            && map.detach()
        {
            log::info!("map unmounted");
        }
    }

    pub fn set_mode(&mut self, mode: DrawMode) {
        if mode != self.mode {
            log::debug!("draw mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;
        self.bind_interaction();
    }

    fn bind_interaction(&mut self) {
        let Some(map) = self.map.as_mut() else {
            self.current = None;
            return;
        };
        if let Some(handle) = self.current.take() {
            map.remove_interaction(handle);
        }
        if let Some(kind) = self.mode.geometry_kind() {
            let draw = Draw::new(kind, self.source.clone());
            self.current = Some(map.add_interaction(draw));
        }
    }

    fn draw_end(&mut self, ended: Option<FeatureId>) {
        if let Some(id) = ended {
            self.last_drawn = Some(id);
        }
    }

    pub fn click(&mut self, pixel: [f64; 2]) {
        let ended = self.map.as_mut().and_then(|m| m.handle_click(pixel));
        self.draw_end(ended);
    }

    pub fn double_click(&mut self) {
        self.finish_drawing();
    }

    pub fn finish_drawing(&mut self) {
        let ended = self.map.as_mut().and_then(Map::finish_drawing);
        self.draw_end(ended);
    }

    pub fn pointer_move(&mut self, pixel: [f64; 2]) {
        if let Some(map) = self.map.as_mut() {
            map.handle_pointer_move(pixel);
        }
    }

    pub fn abort_drawing(&mut self) {
        if let Some(map) = self.map.as_mut() {
            map.abort_drawing();
        }
    }

    pub fn remove_last_point(&mut self) {
        if let Some(map) = self.map.as_mut() {
            map.remove_last_point();
        }
    }

    /// Measure the last drawn feature and update the measurement text.
    pub fn measure(&mut self) {
        let Some(id) = self.last_drawn else {
            log::debug!("measure requested before anything was drawn");
            return;
        };
        let result = match self.source.borrow().get(id) {
            Some(feature) => measure(&feature.shape),
            None => return,
        };
        match result.describe(&self.formatter) {
            Some(text) => self.measurement = text,
            None => {
                if let Measurement::Unsupported(kind) = result {
                    log::debug!("no length or area for {kind}");
                }
                self.measurement.clear();
            }
        }
    }

    /// Current measurement text, `None` while empty.
    pub fn measurement(&self) -> Option<&str> {
        if self.measurement.is_empty() {
            None
        } else {
            Some(&self.measurement)
        }
    }

    /// Label of the measure button, `None` when it is hidden.
    pub fn measure_label(&self) -> Option<&'static str> {
        match self.mode {
            DrawMode::Point => None,
            DrawMode::Polygon => Some("Measure Area"),
            DrawMode::LineString | DrawMode::None => Some("Measure Length"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryKind;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingTarget(Rc<Cell<u32>>);

    impl MapTarget for CountingTarget {
        fn detach(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn mounted() -> (MapViewState, Rc<Cell<u32>>) {
        let detached = Rc::new(Cell::new(0));
        let mut view = MapViewState::default();
        view.mount(Box::new(CountingTarget(detached.clone())));
        if let Some(map) = view.map_mut() {
            map.set_size([800.0, 600.0]);
        }
        (view, detached)
    }

    fn attached_kinds(view: &MapViewState) -> Vec<GeometryKind> {
        view.map()
            .map(|m| m.interactions().map(Draw::kind).collect())
            .unwrap_or_default()
    }

    fn draw_line(view: &mut MapViewState) {
        view.click([100.0, 300.0]);
        view.click([500.0, 300.0]);
        view.double_click();
    }

    fn draw_triangle(view: &mut MapViewState) {
        view.click([100.0, 100.0]);
        view.click([500.0, 100.0]);
        view.click([300.0, 400.0]);
        view.click([100.0, 100.0]);
    }

    #[test]
    fn initial_view_after_mount() {
        let (view, _) = mounted();
        let v = view.map().map(|m| *m.view());
        assert_eq!(v.map(|v| [v.center().x, v.center().y]), Some([-11_000_000.0, 4_600_000.0]));
        assert_eq!(v.map(|v| v.zoom()), Some(4.0));
        assert_eq!(view.mode(), DrawMode::LineString);
        assert_eq!(attached_kinds(&view), vec![GeometryKind::LineString]);
        let layers = view.map().map(|m| m.layers().len());
        assert_eq!(layers, Some(2));
    }

    #[test]
    fn each_mode_attaches_exactly_one_interaction() {
        let (mut view, _) = mounted();
        for (mode, kind) in [
            (DrawMode::Point, GeometryKind::Point),
            (DrawMode::Polygon, GeometryKind::Polygon),
            (DrawMode::LineString, GeometryKind::LineString),
            (DrawMode::Polygon, GeometryKind::Polygon),
        ] {
            view.set_mode(mode);
            assert_eq!(attached_kinds(&view), vec![kind]);
        }
    }

    #[test]
    fn none_mode_detaches_interaction() {
        let (mut view, _) = mounted();
        view.set_mode(DrawMode::None);
        assert!(attached_kinds(&view).is_empty());
        view.set_mode(DrawMode::Point);
        assert_eq!(attached_kinds(&view), vec![GeometryKind::Point]);
    }

    #[test]
    fn mode_change_before_mount_attaches_nothing() {
        let mut view = MapViewState::default();
        view.set_mode(DrawMode::Polygon);
        assert!(view.map().is_none());
        let detached = Rc::new(Cell::new(0));
        view.mount(Box::new(CountingTarget(detached)));
        assert_eq!(attached_kinds(&view), vec![GeometryKind::Polygon]);
    }

    #[test]
    fn measure_line_reports_length() {
        let (mut view, _) = mounted();
        draw_line(&mut view);
        assert_eq!(view.last_drawn(), Some(FeatureId(1)));
        view.measure();
        let text = view.measurement().unwrap_or_default();
        assert!(text.starts_with("Length: "), "{text}");
        assert!(text.ends_with(" meters"), "{text}");
        assert!(!text.contains("Area"));
    }

    #[test]
    fn measure_polygon_reports_area() {
        let (mut view, _) = mounted();
        view.set_mode(DrawMode::Polygon);
        draw_triangle(&mut view);
        view.measure();
        let text = view.measurement().unwrap_or_default();
        assert!(text.starts_with("Area: "), "{text}");
        assert!(text.ends_with(" square meters"), "{text}");
    }

    #[test]
    fn measure_point_has_no_output() {
        let (mut view, _) = mounted();
        view.set_mode(DrawMode::Point);
        view.click([10.0, 10.0]);
        view.measure();
        assert_eq!(view.measurement(), None);
    }

    #[test]
    fn measure_point_clears_previous_length() {
        let (mut view, _) = mounted();
        draw_line(&mut view);
        view.measure();
        assert!(view.measurement().is_some_and(|t| t.starts_with("Length: ")));

        view.set_mode(DrawMode::Point);
        view.click([20.0, 20.0]);
        view.set_mode(DrawMode::LineString);
        assert_eq!(view.measure_label(), Some("Measure Length"));
        view.measure();
        assert_eq!(view.measurement(), None);
    }

    #[test]
    fn measure_before_drawing_is_a_no_op() {
        let (mut view, _) = mounted();
        view.measure();
        assert_eq!(view.measurement(), None);
        assert_eq!(view.last_drawn(), None);
    }

    #[test]
    fn drawings_accumulate_across_modes() {
        let (mut view, _) = mounted();
        draw_line(&mut view);
        view.set_mode(DrawMode::Point);
        view.click([10.0, 10.0]);
        view.set_mode(DrawMode::Polygon);
        draw_triangle(&mut view);
        assert_eq!(view.source().borrow().len(), 3);
        assert_eq!(view.last_drawn(), Some(FeatureId(3)));
    }

    #[test]
    fn drawing_does_not_clear_measurement() {
        let (mut view, _) = mounted();
        draw_line(&mut view);
        view.measure();
        let before = view.measurement().map(str::to_string);
        view.click([50.0, 50.0]);
        view.click([80.0, 80.0]);
        view.double_click();
        assert_eq!(view.last_drawn(), Some(FeatureId(2)));
        assert_eq!(view.measurement().map(str::to_string), before);
    }

    #[test]
    fn unmount_detaches_once_after_mode_switches() {
        let (mut view, detached) = mounted();
        for mode in [DrawMode::Point, DrawMode::None, DrawMode::Polygon, DrawMode::LineString] {
            view.set_mode(mode);
        }
        view.unmount();
        view.unmount();
        assert_eq!(detached.get(), 1);
        assert!(!view.is_mounted());
        drop(view);
        assert_eq!(detached.get(), 1);
    }

    #[test]
    fn remount_releases_previous_target() {
        let (mut view, first) = mounted();
        let second = Rc::new(Cell::new(0));
        view.mount(Box::new(CountingTarget(second.clone())));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
        assert_eq!(attached_kinds(&view).len(), 1);
    }

    #[test]
    fn button_label_follows_mode() {
        let mut view = MapViewState::default();
        assert_eq!(view.measure_label(), Some("Measure Length"));
        view.set_mode(DrawMode::Polygon);
        assert_eq!(view.measure_label(), Some("Measure Area"));
        view.set_mode(DrawMode::Point);
        assert_eq!(view.measure_label(), None);
        view.set_mode(DrawMode::None);
        assert_eq!(view.measure_label(), Some("Measure Length"));
    }
}
