use serde::{Deserialize, Serialize};
use touch_rect_core::{OrientedRect3D, Quad};

use crate::{ObjectHandle, RegistryError};

/// Synthetic identity assigned to each finalized selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlacementId(pub u64);

impl std::fmt::Display for PlacementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "placement-{}", self.0)
    }
}

/// A finalized selection lifted into the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// The normalized rectangle the placement was made from.
    pub source: Quad,
    pub rect: OrientedRect3D,
    pub handle: ObjectHandle,
}

/// Placed objects keyed by their selection identity.
///
/// Entries are kept in insertion order. The only bulk mutation is
/// [`remove_all`](Self::remove_all).
#[derive(Debug, Default)]
pub struct PlacementRegistry {
    entries: Vec<(PlacementId, PlacedObject)>,
    next_id: u64,
}

impl PlacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh identity. Ids are never reused, even across clears.
    pub fn allocate_id(&mut self) -> PlacementId {
        let id = PlacementId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Register `object` under `id`, refusing to overwrite an existing entry.
    pub fn insert(&mut self, id: PlacementId, object: PlacedObject) -> Result<(), RegistryError> {
        if self.get(id).is_some() {
            return Err(RegistryError::DuplicateId(id));
        }
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.entries.push((id, object));
        Ok(())
    }

    /// Register `object` under a freshly allocated id.
    pub fn register(&mut self, object: PlacedObject) -> PlacementId {
        let id = self.allocate_id();
        self.entries.push((id, object));
        id
    }

    pub fn get(&self, id: PlacementId) -> Option<&PlacedObject> {
        self.entries
            .iter()
            .find_map(|(key, obj)| (*key == id).then_some(obj))
    }

    /// Empty the registry, returning what it held in insertion order.
    pub fn remove_all(&mut self) -> Vec<(PlacementId, PlacedObject)> {
        std::mem::take(&mut self.entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlacementId, &PlacedObject)> {
        self.entries.iter().map(|(id, obj)| (*id, obj))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point2, Point3, UnitQuaternion, Vector2};

    fn object(handle: u64) -> PlacedObject {
        let p = Point2::new(0.5, 0.5);
        PlacedObject {
            source: Quad::new(p, p, p, p),
            rect: OrientedRect3D {
                center: Point3::origin(),
                orientation: UnitQuaternion::identity(),
                size: Vector2::new(0.2, 0.3),
                corners: [Point3::origin(); 4],
                plane_id: 0,
            },
            handle: ObjectHandle(handle),
        }
    }

    #[test]
    fn insert_refuses_duplicates() {
        let mut reg = PlacementRegistry::new();
        let id = reg.allocate_id();
        reg.insert(id, object(1)).expect("first insert");
        assert_eq!(
            reg.insert(id, object(2)),
            Err(RegistryError::DuplicateId(id))
        );
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(id).map(|o| o.handle), Some(ObjectHandle(1)));
    }

    #[test]
    fn ids_are_fresh_after_clear_and_manual_insert() {
        let mut reg = PlacementRegistry::new();
        let a = reg.allocate_id();
        reg.insert(PlacementId(10), object(1)).expect("insert");
        let b = reg.allocate_id();
        assert_eq!(a, PlacementId(0));
        assert_eq!(b, PlacementId(11));

        let drained = reg.remove_all();
        assert_eq!(drained.len(), 1);
        assert_eq!(reg.allocate_id(), PlacementId(12));
    }

    #[test]
    fn insert_at_top_of_id_space() {
        let mut reg = PlacementRegistry::new();
        let top = PlacementId(u64::MAX);
        reg.insert(top, object(1)).expect("insert");
        assert_eq!(reg.insert(top, object(2)), Err(RegistryError::DuplicateId(top)));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn remove_all_is_idempotent() {
        let mut reg = PlacementRegistry::new();
        for h in 0..3 {
            reg.register(object(h));
        }
        let order: Vec<_> = reg.iter().map(|(id, _)| id.0).collect();
        assert_eq!(order, vec![0, 1, 2]);

        assert_eq!(reg.remove_all().len(), 3);
        assert!(reg.is_empty());
        assert!(reg.remove_all().is_empty());
        assert!(reg.is_empty());
    }
}
