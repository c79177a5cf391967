use std::collections::HashMap;

use shelter_shared::{LatLng, ShelterId};

#[derive(Debug)]
pub struct PlacedMarker<M> {
    pub marker: M,
    pub position: LatLng,
}

/// Markers keyed by shelter id. Iteration follows insertion order.
#[derive(Debug)]
pub struct MarkerRegistry<M> {
    order: Vec<ShelterId>,
    entries: HashMap<ShelterId, PlacedMarker<M>>,
}

impl<M> Default for MarkerRegistry<M> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }
}

impl<M> MarkerRegistry<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn contains(&self, id: &ShelterId) -> bool {
        self.entries.contains_key(id)
    }

    /// Hands the marker back when `id` is already taken.
    pub fn insert(&mut self, id: ShelterId, placed: PlacedMarker<M>) -> Result<(), PlacedMarker<M>> {
        if self.entries.contains_key(&id) {
            return Err(placed);
        }
        self.order.push(id.clone());
        self.entries.insert(id, placed);
        Ok(())
    }

    pub fn get(&self, id: &ShelterId) -> Option<&PlacedMarker<M>> {
        self.entries.get(id)
    }

    /// Empty the registry, returning markers in insertion order.
    pub fn drain(&mut self) -> Vec<PlacedMarker<M>> {
        let mut entries = std::mem::take(&mut self.entries);
        self.order
            .drain(..)
            .filter_map(|id| entries.remove(&id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(marker: u32) -> PlacedMarker<u32> {
        PlacedMarker {
            marker,
            position: LatLng::new(35.33, 139.40),
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let mut registry = MarkerRegistry::new();
        for (id, marker) in [(5, 0), (1, 1), (3, 2)] {
            assert!(registry.insert(ShelterId::Number(id), placed(marker)).is_ok());
        }
        assert_eq!(registry.get(&ShelterId::Number(1)).map(|p| p.marker), Some(1));
        let markers: Vec<_> = registry.drain().into_iter().map(|p| p.marker).collect();
        assert_eq!(markers, vec![0, 1, 2]);
    }

    #[test]
    fn duplicate_id_is_refused() {
        let mut registry = MarkerRegistry::new();
        assert!(registry.insert(ShelterId::from("a"), placed(0)).is_ok());
        let refused = registry
            .insert(ShelterId::from("a"), placed(1))
            .expect_err("duplicate must be refused");
        assert_eq!(refused.marker, 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&ShelterId::from("a")).map(|p| p.marker), Some(0));
    }

    #[test]
    fn drain_empties_in_order() {
        let mut registry = MarkerRegistry::new();
        registry.insert(ShelterId::Number(2), placed(7)).ok();
        registry.insert(ShelterId::Number(1), placed(8)).ok();
        let markers: Vec<_> = registry.drain().into_iter().map(|p| p.marker).collect();
        assert_eq!(markers, vec![7, 8]);
        assert_eq!(registry.len(), 0);
        assert!(!registry.contains(&ShelterId::Number(2)));
    }
}
