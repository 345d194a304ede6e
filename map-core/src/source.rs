use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::Shape;

/// Stable identifier assigned by a [`FeatureSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub id: FeatureId,
    pub shape: Shape,
}

/// Mutable feature collection written by draw interactions and read by the
/// vector layer and the measurement action.
#[derive(Debug, Default)]
pub struct FeatureSource {
    features: Vec<Feature>,
    last_id: u64,
}

/// Drawing source shared between the vector layer and the draw interaction.
pub type SharedSource = Rc<RefCell<FeatureSource>>;

impl FeatureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSource {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn add(&mut self, shape: Shape) -> FeatureId {
        self.last_id += 1;
        let id = FeatureId(self.last_id);
        self.features.push(Feature { id, shape });
        id
    }

    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Point;

    #[test]
    fn ids_are_assigned_in_order() {
        let mut src = FeatureSource::new();
        let a = src.add(Shape::Point(Point::new(1.0, 2.0)));
        let b = src.add(Shape::Point(Point::new(3.0, 4.0)));
        assert_eq!(a, FeatureId(1));
        assert_eq!(b, FeatureId(2));
        assert_eq!(src.len(), 2);
        assert_eq!(
            src.get(b).map(|f| &f.shape),
            Some(&Shape::Point(Point::new(3.0, 4.0)))
        );
    }

    #[test]
    fn unknown_id_is_none() {
        let src = FeatureSource::new();
        assert!(src.is_empty());
        assert!(src.get(FeatureId(7)).is_none());
    }
}
