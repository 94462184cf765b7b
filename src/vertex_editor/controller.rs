//! Editing state for one vertex editor window.
//!
//! [`VertexEditor`] owns the data sets and every piece of transient UI state
//! (selection, hovered point, drag in progress). The egui layer feeds it
//! pointer positions already converted to image space and reads the state
//! back when painting.

use tracing::{debug, info};

use crate::geometry::{self, Point, POINT_RADIUS};
use crate::regions::{NamedRegionCollection, Region, RegionError};

/// Receives editing events synchronously, in the order they happen.
pub trait EditorListener {
    fn on_region_selected(&mut self, _name: &str) {}
    fn on_point_added(&mut self, _region: &str, _index: usize, _point: Point) {}
    fn on_point_moved(&mut self, _region: &str, _index: usize, _point: Point) {}
    fn on_hovered(&mut self, _index: Option<usize>) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// `offset` is the point minus the pointer at the moment of the grab.
    Dragging { index: usize, offset: Point },
}

/// Splits user input like `"hull; hit box;feet"` into data set names.
///
/// All whitespace is dropped (so `"hit box"` becomes `"hitbox"`) and empty
/// parts are skipped.
pub fn parse_names(input: &str) -> Vec<String> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split(';')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

pub struct VertexEditor {
    regions: NamedRegionCollection,
    selected: Option<String>,
    hovered: Option<usize>,
    drag: DragState,
    /// Hit radius in image space.
    radius: f32,
    listeners: Vec<Box<dyn EditorListener>>,
}

impl Default for VertexEditor {
    fn default() -> Self {
        Self::new(POINT_RADIUS)
    }
}

impl VertexEditor {
    pub fn new(radius: f32) -> Self {
        Self {
            regions: NamedRegionCollection::new(),
            selected: None,
            hovered: None,
            drag: DragState::Idle,
            radius,
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn EditorListener>) {
        self.listeners.push(listener);
    }

    pub fn regions(&self) -> &NamedRegionCollection {
        &self.regions
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_region(&self) -> Option<&Region> {
        self.selected.as_deref().and_then(|n| self.regions.get(n))
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Hit radius is kept constant on screen, so it shrinks in image space as
    /// the zoom grows.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    /// Adds one data set per name in `input`; see [`parse_names`].
    pub fn add_data_sets(&mut self, input: &str) -> Vec<Result<usize, RegionError>> {
        parse_names(input)
            .into_iter()
            .map(|name| {
                let res = self.regions.add(&name);
                if res.is_ok() {
                    info!(%name, "created data set");
                }
                res
            })
            .collect()
    }

    pub fn select(&mut self, name: &str) {
        if !self.regions.contains(name) || self.selected.as_deref() == Some(name) {
            return;
        }
        self.selected = Some(name.to_owned());
        self.hovered = None;
        self.drag = DragState::Idle;
        for l in &mut self.listeners {
            l.on_region_selected(name);
        }
    }

    pub fn clear_selected(&mut self) {
        if let Some(region) = self.selected.as_deref().and_then(|n| self.regions.get_mut(n)) {
            region.clear();
            self.hovered = None;
            self.drag = DragState::Idle;
        }
    }

    pub fn clear_all(&mut self) {
        self.regions.clear_points();
        self.hovered = None;
        self.drag = DragState::Idle;
    }

    pub fn delete_selected(&mut self) {
        if let Some(name) = self.selected.take() {
            self.regions.remove(&name);
            info!(%name, "deleted data set");
        }
        self.hovered = None;
        self.drag = DragState::Idle;
    }

    pub fn delete_all(&mut self) {
        self.regions.clear();
        self.selected = None;
        self.hovered = None;
        self.drag = DragState::Idle;
    }

    /// The point table highlights the hovered point, or the newest one.
    pub fn table_highlight(&self) -> Option<usize> {
        self.hovered
            .or_else(|| self.selected_region().and_then(|r| r.len().checked_sub(1)))
    }

    pub fn selected_as_float_list(&self) -> Option<String> {
        self.selected_region().map(Region::to_float_list)
    }

    pub fn pointer_moved(&mut self, pos: Point) {
        let Some(name) = self.selected.clone() else { return };
        let Some(region) = self.regions.get_mut(&name) else { return };

        if let DragState::Dragging { index, offset } = self.drag {
            let target = Point::new(pos.x + offset.x, pos.y + offset.y);
            if region.points().get(index) == Some(&target) {
                return;
            }
            if region.set(index, target) {
                for l in &mut self.listeners {
                    l.on_point_moved(&name, index, target);
                }
            }
            return;
        }

        let hovered = geometry::hit_test(region.points(), pos, self.radius);
        if hovered != self.hovered {
            self.hovered = hovered;
            for l in &mut self.listeners {
                l.on_hovered(hovered);
            }
        }
    }

    /// Starts dragging a point under `pos`, or appends a new point there.
    pub fn pointer_pressed(&mut self, pos: Point) {
        let Some(name) = self.selected.clone() else { return };
        let Some(region) = self.regions.get_mut(&name) else { return };

        if let Some(index) = geometry::hit_test(region.points(), pos, self.radius) {
            let grabbed = region.points()[index];
            debug!(region = %name, index, "drag started");
            self.drag = DragState::Dragging {
                index,
                offset: Point::new(grabbed.x - pos.x, grabbed.y - pos.y),
            };
            self.hovered = Some(index);
            return;
        }

        region.push(pos);
        let index = region.len() - 1;
        self.hovered = Some(index);
        for l in &mut self.listeners {
            l.on_point_added(&name, index, pos);
            l.on_hovered(Some(index));
        }
    }

    pub fn pointer_released(&mut self) {
        if let DragState::Dragging { index, .. } = self.drag {
            debug!(index, "drag finished");
        }
        self.drag = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl EditorListener for Recorder {
        fn on_region_selected(&mut self, name: &str) {
            self.0.borrow_mut().push(format!("select {name}"));
        }
        fn on_point_added(&mut self, region: &str, index: usize, _point: Point) {
            self.0.borrow_mut().push(format!("add {region} {index}"));
        }
        fn on_point_moved(&mut self, region: &str, index: usize, _point: Point) {
            self.0.borrow_mut().push(format!("move {region} {index}"));
        }
    }

    #[test]
    fn names_are_compacted_and_split() {
        assert_eq!(parse_names(" a ; b;;c "), vec!["a", "b", "c"]);
        assert_eq!(parse_names("hit box"), vec!["hitbox"]);
        assert!(parse_names(" ; ").is_empty());
    }

    #[test]
    fn batch_add_reports_duplicates() {
        let mut ed = VertexEditor::default();
        let res = ed.add_data_sets("b;a;b");
        assert_eq!(res[0], Ok(0));
        assert_eq!(res[1], Ok(0));
        assert_eq!(res[2], Err(RegionError::DuplicateName("b".into())));
        assert_eq!(ed.regions().len(), 2);
    }

    #[test]
    fn press_without_selection_is_ignored() {
        let mut ed = VertexEditor::default();
        ed.add_data_sets("a");
        ed.pointer_pressed(Point::new(1.0, 1.0));
        assert!(ed.regions().get("a").unwrap().is_empty());
    }

    #[test]
    fn press_adds_then_drags() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ed = VertexEditor::default();
        ed.add_listener(Box::new(Recorder(log.clone())));
        ed.add_data_sets("hull");
        ed.select("hull");

        ed.pointer_pressed(Point::new(10.0, 10.0));
        ed.pointer_released();
        ed.pointer_pressed(Point::new(40.0, 40.0));
        ed.pointer_released();
        assert_eq!(ed.selected_region().unwrap().len(), 2);

        ed.pointer_pressed(Point::new(12.0, 11.0));
        assert!(matches!(ed.drag(), DragState::Dragging { index: 0, .. }));
        ed.pointer_moved(Point::new(32.0, 6.0));
        ed.pointer_released();
        assert_eq!(ed.drag(), DragState::Idle);
        assert_eq!(ed.selected_region().unwrap().points()[0], Point::new(30.0, 5.0));

        assert_eq!(
            *log.borrow(),
            vec!["select hull", "add hull 0", "add hull 1", "move hull 0"]
        );
    }

    #[test]
    fn off_centre_grab_does_not_snap() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ed = VertexEditor::default();
        ed.add_listener(Box::new(Recorder(log.clone())));
        ed.add_data_sets("a");
        ed.select("a");
        ed.pointer_pressed(Point::new(10.0, 10.0));
        ed.pointer_released();

        // the window reports the press position as a move in the same frame
        ed.pointer_pressed(Point::new(13.0, 14.0));
        ed.pointer_moved(Point::new(13.0, 14.0));
        assert_eq!(ed.selected_region().unwrap().points()[0], Point::new(10.0, 10.0));

        ed.pointer_moved(Point::new(15.0, 14.0));
        ed.pointer_released();
        assert_eq!(ed.selected_region().unwrap().points()[0], Point::new(12.0, 10.0));
        assert_eq!(*log.borrow(), vec!["select a", "add a 0", "move a 0"]);
    }

    #[test]
    fn hover_and_table_highlight() {
        let mut ed = VertexEditor::default();
        ed.add_data_sets("a");
        ed.select("a");
        assert_eq!(ed.table_highlight(), None);
        ed.pointer_pressed(Point::new(10.0, 10.0));
        ed.pointer_pressed(Point::new(50.0, 50.0));
        ed.pointer_moved(Point::new(11.0, 9.0));
        assert_eq!(ed.hovered(), Some(0));
        assert_eq!(ed.table_highlight(), Some(0));
        ed.pointer_moved(Point::new(200.0, 200.0));
        assert_eq!(ed.hovered(), None);
        assert_eq!(ed.table_highlight(), Some(1));
    }

    #[test]
    fn selection_survives_unrelated_changes() {
        let mut ed = VertexEditor::default();
        ed.add_data_sets("m");
        ed.select("m");
        ed.pointer_pressed(Point::new(1.0, 1.0));
        ed.add_data_sets("a;z");
        assert_eq!(ed.selected(), Some("m"));
        assert_eq!(ed.selected_region().unwrap().len(), 1);
    }

    #[test]
    fn delete_selected_drops_selection() {
        let mut ed = VertexEditor::default();
        ed.add_data_sets("a;b");
        ed.select("b");
        ed.delete_selected();
        assert_eq!(ed.selected(), None);
        assert_eq!(ed.regions().names().collect::<Vec<_>>(), vec!["a"]);
        ed.delete_all();
        assert!(ed.regions().is_empty());
    }
}
