//! Order Value Space
//!
//! Lists within a board and items within a list are ordered by an opaque
//! `f64`. Only strict ordering matters; values need not be contiguous.
//! Archived entities keep their value but take no part in rank math.

use std::cmp::Ordering;

/// Default spacing between fresh order values
pub const ORDER_STEP: f64 = 1.0;

/// Anything that occupies a slot in a container's order
pub trait Reorderable {
    fn id(&self) -> u32;
    fn container(&self) -> u32;
    fn order(&self) -> f64;
    fn archived(&self) -> bool;
    /// Move to `container` at `order`
    fn place(&mut self, container: u32, order: f64);
}

/// Kind-agnostic view of one entity's slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placed {
    pub id: u32,
    pub container: u32,
    pub order: f64,
    pub archived: bool,
}

impl Placed {
    pub fn of<T: Reorderable>(entity: &T) -> Self {
        Self {
            id: entity.id(),
            container: entity.container(),
            order: entity.order(),
            archived: entity.archived(),
        }
    }
}

impl Reorderable for Placed {
    fn id(&self) -> u32 {
        self.id
    }
    fn container(&self) -> u32 {
        self.container
    }
    fn order(&self) -> f64 {
        self.order
    }
    fn archived(&self) -> bool {
        self.archived
    }
    fn place(&mut self, container: u32, order: f64) {
        self.container = container;
        self.order = order;
    }
}

/// Display comparison: ascending order, id breaks ties
pub fn cmp_display<T: Reorderable>(a: &T, b: &T) -> Ordering {
    a.order().total_cmp(&b.order()).then_with(|| a.id().cmp(&b.id()))
}

/// Non-archived children of `container` in display order
pub fn display_order<T: Reorderable>(entities: &[T], container: u32) -> Vec<&T> {
    let mut visible: Vec<&T> = entities
        .iter()
        .filter(|e| e.container() == container && !e.archived())
        .collect();
    visible.sort_by(|a, b| cmp_display(*a, *b));
    visible
}

/// Rank of `id` among its container's non-archived siblings
pub fn rank_of<T: Reorderable>(entities: &[T], id: u32) -> Option<usize> {
    let entity = entities.iter().find(|e| e.id() == id && !e.archived())?;
    display_order(entities, entity.container())
        .iter()
        .position(|e| e.id() == id)
}

/// An order value strictly between `prev` and `next`.
///
/// Open ends extend by `step`. `None` means no representable value exists
/// and the container has to be renormalised.
pub fn order_between(prev: Option<f64>, next: Option<f64>, step: f64) -> Option<f64> {
    let candidate = match (prev, next) {
        (Some(p), Some(n)) => p + (n - p) / 2.0,
        (Some(p), None) => p + step,
        (None, Some(n)) => n - step,
        (None, None) => step,
    };
    let above = prev.map_or(true, |p| candidate > p);
    let below = next.map_or(true, |n| candidate < n);
    (candidate.is_finite() && above && below).then_some(candidate)
}

/// Order value for a new child appended to the end of a container
pub fn append_order<T: Reorderable>(entities: &[T], container: u32, step: f64) -> f64 {
    entities
        .iter()
        .filter(|e| e.container() == container)
        .map(|e| e.order())
        .max_by(f64::total_cmp)
        .map_or(step, |max| max + step)
}

/// Evenly spaced values for a sequence of `len` siblings
pub fn renumbered(len: usize, step: f64) -> impl Iterator<Item = f64> {
    (1..=len).map(move |rank| rank as f64 * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(id: u32, container: u32, order: f64) -> Placed {
        Placed { id, container, order, archived: false }
    }

    #[test]
    fn test_display_order_skips_archived_and_other_containers() {
        let mut archived = placed(4, 1, 0.5);
        archived.archived = true;
        let all = vec![placed(1, 1, 3.0), placed(2, 1, 1.0), placed(3, 2, 2.0), archived];
        let ids: Vec<u32> = display_order(&all, 1).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(rank_of(&all, 1), Some(1));
        assert_eq!(rank_of(&all, 4), None);
    }

    #[test]
    fn test_between_neighbours() {
        assert_eq!(order_between(Some(1.0), Some(2.0), ORDER_STEP), Some(1.5));
        assert_eq!(order_between(Some(3.0), None, ORDER_STEP), Some(4.0));
        assert_eq!(order_between(None, Some(1.0), ORDER_STEP), Some(0.0));
        assert_eq!(order_between(None, None, ORDER_STEP), Some(1.0));
    }

    #[test]
    fn test_between_exhausted() {
        let a = 1.0_f64;
        let b = f64::from_bits(a.to_bits() + 1);
        assert_eq!(order_between(Some(a), Some(b), ORDER_STEP), None);
        assert_eq!(order_between(Some(2.0), Some(2.0), ORDER_STEP), None);
    }

    #[test]
    fn test_repeated_front_insertions_stay_strict() {
        let mut first = 1.0;
        for _ in 0..100 {
            let next = order_between(None, Some(first), ORDER_STEP).unwrap();
            assert!(next < first);
            first = next;
        }
    }

    #[test]
    fn test_append_order() {
        let all = vec![placed(1, 1, 3.0), placed(2, 1, 7.5), placed(3, 2, 20.0)];
        assert_eq!(append_order(&all, 1, ORDER_STEP), 8.5);
        assert_eq!(append_order(&all, 9, ORDER_STEP), ORDER_STEP);
    }

    #[test]
    fn test_renumbered() {
        let values: Vec<f64> = renumbered(3, 10.0).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);
    }
}
