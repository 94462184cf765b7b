//! Named point sets ("data sets") authored in the vertex editor.
//!
//! A [`NamedRegionCollection`] keeps its regions sorted by name using plain
//! byte-wise string ordering, so `"B" < "a"` and names are case-sensitive.
//! Names are unique and cannot be changed once a region exists; to rename a
//! region it has to be removed and added again.
//!
//! Callers that need to remember the "current" region across UI events keep
//! its name and look it up again with [`NamedRegionCollection::get_mut`]. The
//! lookup is unaffected by regions being added or removed elsewhere.

use thiserror::Error;
use tracing::debug;

use crate::geometry::Point;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("A data set with the name '{0}' already exists.")]
    DuplicateName(String),
}

/// The polygon of a single data set. Point order defines edge order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    points: Vec<Point>,
}

impl Region {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Overwrites the point at `index`. Returns false when out of range.
    pub fn set(&mut self, index: usize, point: Point) -> bool {
        match self.points.get_mut(index) {
            Some(p) => {
                *p = point;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Flattened `x0, y0, x1, y1, ...` text, ready to paste into game code.
    pub fn to_float_list(&self) -> String {
        self.points
            .iter()
            .flat_map(|p| [p.x, p.y])
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone)]
struct NamedRegion {
    name: String,
    region: Region,
}

#[derive(Debug, Clone, Default)]
pub struct NamedRegionCollection {
    sets: Vec<NamedRegion>,
}

impl NamedRegionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    fn search(&self, name: &str) -> Result<usize, usize> {
        self.sets.binary_search_by(|s| s.name.as_str().cmp(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.search(name).is_ok()
    }

    /// Creates an empty region named `name`.
    ///
    /// Returns the sorted position of the new region, or
    /// [`RegionError::DuplicateName`] without touching the collection if the
    /// name is taken.
    pub fn add(&mut self, name: &str) -> Result<usize, RegionError> {
        match self.search(name) {
            Ok(_) => Err(RegionError::DuplicateName(name.to_owned())),
            Err(index) => {
                self.sets.insert(
                    index,
                    NamedRegion { name: name.to_owned(), region: Region::default() },
                );
                debug!(name, index, "data set added");
                Ok(index)
            }
        }
    }

    /// Removes the region named `name`. Returns false if there was none.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.search(name) {
            Ok(index) => {
                self.sets.remove(index);
                debug!(name, "data set removed");
                true
            }
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Region> {
        self.search(name).ok().map(|i| &self.sets[i].region)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Region> {
        match self.search(name) {
            Ok(i) => Some(&mut self.sets[i].region),
            Err(_) => None,
        }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.search(name).ok()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sets.iter().map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Region)> + '_ {
        self.sets.iter().map(|s| (s.name.as_str(), &s.region))
    }

    /// Empties every region but keeps the names.
    pub fn clear_points(&mut self) {
        for s in &mut self.sets {
            s.region.clear();
        }
    }

    pub fn clear(&mut self) {
        self.sets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_returns_sorted_index() {
        let mut c = NamedRegionCollection::new();
        assert_eq!(c.add("Test"), Ok(0));
        assert_eq!(c.add("Test"), Err(RegionError::DuplicateName("Test".into())));
        assert_eq!(c.len(), 1);
        assert_eq!(c.add("Another Test"), Ok(0));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn ordering_is_case_sensitive() {
        let mut c = NamedRegionCollection::new();
        c.add("b").unwrap();
        c.add("B").unwrap();
        c.add("a").unwrap();
        assert!(!c.contains("A"));
        assert_eq!(c.names().collect::<Vec<_>>(), vec!["B", "a", "b"]);
    }

    #[test]
    fn no_trimming_on_lookup() {
        let mut c = NamedRegionCollection::new();
        c.add("hull").unwrap();
        assert!(!c.contains(" hull"));
        assert!(c.get("hull ").is_none());
    }

    #[test]
    fn region_set_out_of_range() {
        let mut r = Region::default();
        r.push(Point::new(1.0, 2.0));
        assert!(r.set(0, Point::new(3.0, 4.0)));
        assert!(!r.set(1, Point::new(0.0, 0.0)));
        assert_eq!(r.points(), &[Point::new(3.0, 4.0)]);
    }

    #[test]
    fn float_list_format() {
        let mut r = Region::default();
        r.push(Point::new(1.0, 2.5));
        r.push(Point::new(-3.0, 4.0));
        assert_eq!(r.to_float_list(), "1, 2.5, -3, 4");
        assert_eq!(Region::default().to_float_list(), "");
    }

    #[test]
    fn clear_points_keeps_names() {
        let mut c = NamedRegionCollection::new();
        c.add("a").unwrap();
        c.get_mut("a").unwrap().push(Point::new(1.0, 1.0));
        c.clear_points();
        assert_eq!(c.len(), 1);
        assert!(c.get("a").unwrap().is_empty());
        c.clear();
        assert!(c.is_empty());
    }
}
