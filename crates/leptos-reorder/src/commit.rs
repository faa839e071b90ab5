//! Reorder Committer
//!
//! Turns a released drag into order-value mutations, applies them to
//! in-memory state before the store confirms, and rolls back on rejection.

use tracing::{debug, info, warn};

use crate::config::DndConfig;
use crate::error::{ReorderError, ReorderResult};
use crate::order::{display_order, order_between, renumbered, Placed, Reorderable};
use crate::persist::OrderStore;
use crate::session::{DragSession, DragTarget, EntityKind};

/// One entity's container and order
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub id: u32,
    pub container: u32,
    pub order: f64,
}

/// Placements of some entities of one kind
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub kind: EntityKind,
    pub placements: Vec<Placement>,
}

impl Snapshot {
    pub fn get(&self, id: u32) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// Write every placement onto the matching entity. Used for both the
    /// optimistic update and its rollback.
    pub fn apply_to<T: Reorderable>(&self, entities: &mut [T]) {
        for entity in entities.iter_mut() {
            if let Some(p) = self.get(entity.id()) {
                entity.place(p.container, p.order);
            }
        }
    }
}

/// Single store write
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderMutation {
    pub id: u32,
    pub order: f64,
    /// Set only when the entity changes container
    pub new_parent: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReorderPlan {
    pub kind: EntityKind,
    pub moved: u32,
    pub mutations: Vec<OrderMutation>,
    pub before: Snapshot,
    pub after: Snapshot,
    /// Destination siblings were respaced because no value fit between
    /// the neighbours
    pub renormalized: bool,
}

/// In-memory state the committer reads and patches
pub trait ReorderState {
    fn placements(&self, kind: EntityKind) -> Vec<Placed>;
    fn container_exists(&self, kind: EntityKind, container: u32) -> bool;
    fn apply_snapshot(&self, snapshot: &Snapshot);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Committer {
    config: DndConfig,
}

impl Committer {
    pub fn new(config: DndConfig) -> Self {
        Self { config }
    }

    /// Work out the mutations that put the dragged entity at `target`.
    ///
    /// `Ok(None)` when the drop lands where the entity already is.
    pub fn plan(
        &self,
        placements: &[Placed],
        container_exists: impl Fn(u32) -> bool,
        session: &DragSession,
        target: &DragTarget,
    ) -> ReorderResult<Option<ReorderPlan>> {
        let kind = session.kind;
        if !container_exists(target.container) {
            return Err(ReorderError::ContainerMissing(target.container));
        }
        let moving = placements
            .iter()
            .find(|p| p.id == session.id && !p.archived)
            .copied()
            .ok_or(ReorderError::EntityMissing { kind, id: session.id })?;

        let same_container = moving.container == target.container;
        let origin_rank = display_order(placements, moving.container)
            .iter()
            .position(|p| p.id == moving.id)
            .unwrap_or(session.origin_index);

        if same_container && (target.index == origin_rank || target.index == origin_rank + 1) {
            debug!(%kind, id = moving.id, "drop at origin, nothing to do");
            return Ok(None);
        }

        let siblings: Vec<Placed> = display_order(placements, target.container)
            .into_iter()
            .filter(|p| p.id != moving.id)
            .copied()
            .collect();
        let position = if same_container && target.index > origin_rank {
            target.index - 1
        } else {
            target.index
        }
        .min(siblings.len());

        let new_parent = (!same_container).then_some(target.container);
        let prev = position.checked_sub(1).map(|i| siblings[i].order);
        let next = siblings.get(position).map(|p| p.order);

        let plan = match order_between(prev, next, self.config.order_step) {
            Some(order) => ReorderPlan {
                kind,
                moved: moving.id,
                mutations: vec![OrderMutation { id: moving.id, order, new_parent }],
                before: Snapshot {
                    kind,
                    placements: vec![placement(&moving)],
                },
                after: Snapshot {
                    kind,
                    placements: vec![Placement { id: moving.id, container: target.container, order }],
                },
                renormalized: false,
            },
            None => self.renormalized_plan(kind, moving, siblings, position, target.container),
        };
        Ok(Some(plan))
    }

    /// Respace the whole destination sequence with the moved entity in place
    fn renormalized_plan(
        &self,
        kind: EntityKind,
        moving: Placed,
        mut siblings: Vec<Placed>,
        position: usize,
        container: u32,
    ) -> ReorderPlan {
        info!(%kind, container, count = siblings.len() + 1, "renormalising order values");
        siblings.insert(position, moving);

        let mut mutations = Vec::new();
        let mut before = Vec::new();
        let mut after = Vec::new();
        for (entity, order) in siblings.iter().zip(renumbered(siblings.len(), self.config.order_step)) {
            let is_moved = entity.id == moving.id;
            if !is_moved && entity.order == order {
                continue;
            }
            mutations.push(OrderMutation {
                id: entity.id,
                order,
                new_parent: (is_moved && moving.container != container).then_some(container),
            });
            before.push(placement(entity));
            after.push(Placement { id: entity.id, container, order });
        }

        ReorderPlan {
            kind,
            moved: moving.id,
            mutations,
            before: Snapshot { kind, placements: before },
            after: Snapshot { kind, placements: after },
            renormalized: true,
        }
    }

    /// Plan against `state` and apply the result optimistically
    pub fn stage<R: ReorderState + ?Sized>(
        &self,
        state: &R,
        session: &DragSession,
        target: &DragTarget,
    ) -> ReorderResult<Option<ReorderPlan>> {
        let kind = session.kind;
        let placements = state.placements(kind);
        let plan = self.plan(&placements, |c| state.container_exists(kind, c), session, target)?;
        if let Some(plan) = &plan {
            state.apply_snapshot(&plan.after);
        }
        Ok(plan)
    }

    /// Write a staged plan. On rejection, writes that already landed are
    /// reverted and in-memory state goes back to `plan.before`.
    pub async fn persist<S, R>(&self, store: &S, state: &R, plan: &ReorderPlan) -> ReorderResult<()>
    where
        S: OrderStore + ?Sized,
        R: ReorderState + ?Sized,
    {
        let mut written: Vec<u32> = Vec::new();
        for m in &plan.mutations {
            match store.update_entity_order(plan.kind, m.id, m.order, m.new_parent).await {
                Ok(_) => written.push(m.id),
                Err(e) => {
                    warn!(kind = %plan.kind, id = m.id, error = %e, "order write rejected, rolling back");
                    revert_written(store, plan, &written).await;
                    state.apply_snapshot(&plan.before);
                    return Err(ReorderError::Persistence(e.to_string()));
                }
            }
        }
        debug!(kind = %plan.kind, id = plan.moved, writes = plan.mutations.len(), "reorder saved");
        Ok(())
    }

    /// Stage and persist in one go
    pub async fn commit<S, R>(
        &self,
        store: &S,
        state: &R,
        session: &DragSession,
        target: &DragTarget,
    ) -> ReorderResult<Option<ReorderPlan>>
    where
        S: OrderStore + ?Sized,
        R: ReorderState + ?Sized,
    {
        let plan = self.stage(state, session, target)?;
        if let Some(plan) = &plan {
            self.persist(store, state, plan).await?;
        }
        Ok(plan)
    }
}

fn placement(p: &Placed) -> Placement {
    Placement {
        id: p.id,
        container: p.container,
        order: p.order,
    }
}

async fn revert_written<S: OrderStore + ?Sized>(store: &S, plan: &ReorderPlan, written: &[u32]) {
    for id in written {
        let (Some(before), Some(after)) = (plan.before.get(*id), plan.after.get(*id)) else {
            continue;
        };
        let parent = (before.container != after.container).then_some(before.container);
        if let Err(e) = store.update_entity_order(plan.kind, *id, before.order, parent).await {
            warn!(kind = %plan.kind, id, error = %e, "could not revert order write");
        }
    }
}

/// Sibling ids of `container` in display order, for assertions and logs
pub fn sequence(placements: &[Placed], container: u32) -> Vec<u32> {
    display_order(placements, container).into_iter().map(|p| p.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Vector2};
    use crate::input::InputSource;
    use crate::persist::UpdatedEntity;
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};

    const LIST_X: u32 = 10;
    const LIST_Y: u32 = 20;

    fn item(id: u32, container: u32, order: f64) -> Placed {
        Placed { id, container, order, archived: false }
    }

    fn dragging(id: u32, container: u32, index: usize) -> DragSession {
        DragSession {
            kind: EntityKind::Item,
            id,
            origin_container: container,
            origin_index: index,
            origin_order: 0.0,
            dragging: true,
            dialog_open: false,
            rect: Rect::default(),
            pointer_offset: Vector2::default(),
            press_position: Vector2::default(),
            source: InputSource::Pointer,
        }
    }

    fn to(container: u32, index: usize) -> DragTarget {
        DragTarget { container, index }
    }

    /// In-memory board state backed by a RefCell
    struct MemState {
        items: RefCell<Vec<Placed>>,
        lists: Vec<u32>,
    }

    impl MemState {
        fn new(items: Vec<Placed>) -> Self {
            Self { items: RefCell::new(items), lists: vec![LIST_X, LIST_Y] }
        }

        fn seq(&self, container: u32) -> Vec<u32> {
            sequence(&self.items.borrow(), container)
        }

        fn get(&self, id: u32) -> Placed {
            *self.items.borrow().iter().find(|p| p.id == id).unwrap()
        }
    }

    impl ReorderState for MemState {
        fn placements(&self, _kind: EntityKind) -> Vec<Placed> {
            self.items.borrow().clone()
        }
        fn container_exists(&self, _kind: EntityKind, container: u32) -> bool {
            self.lists.contains(&container)
        }
        fn apply_snapshot(&self, snapshot: &Snapshot) {
            snapshot.apply_to(self.items.borrow_mut().as_mut_slice());
        }
    }

    /// Store that records writes and can be told to reject
    #[derive(Default)]
    struct MemStore {
        writes: RefCell<Vec<(u32, f64, Option<u32>)>>,
        fail_after: Cell<Option<usize>>,
    }

    #[async_trait(?Send)]
    impl OrderStore for MemStore {
        type Child = Placed;
        type Error = String;

        async fn update_entity_order(
            &self,
            kind: EntityKind,
            id: u32,
            new_order: f64,
            new_parent_id: Option<u32>,
        ) -> Result<UpdatedEntity, String> {
            if let Some(n) = self.fail_after.get() {
                if self.writes.borrow().len() >= n {
                    return Err("quota exceeded".to_string());
                }
            }
            self.writes.borrow_mut().push((id, new_order, new_parent_id));
            Ok(UpdatedEntity { kind, id, container: new_parent_id.unwrap_or(0), order: new_order })
        }

        async fn load_children(&self, _kind: EntityKind, _container: u32, _archived: bool) -> Result<Vec<Placed>, String> {
            Ok(Vec::new())
        }
    }

    fn abc() -> MemState {
        MemState::new(vec![item(1, LIST_X, 1.0), item(2, LIST_X, 2.0), item(3, LIST_X, 3.0)])
    }

    #[tokio::test]
    async fn test_move_first_to_end() {
        let state = abc();
        let store = MemStore::default();
        let plan = Committer::default()
            .commit(&store, &state, &dragging(1, LIST_X, 0), &to(LIST_X, 3))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(plan.mutations.len(), 1);
        assert!(state.get(1).order > state.get(3).order);
        assert_eq!(state.get(1).order, 4.0);
        assert_eq!(state.seq(LIST_X), vec![2, 3, 1]);
        assert_eq!(store.writes.borrow().as_slice(), &[(1, 4.0, None)]);
    }

    #[tokio::test]
    async fn test_drop_at_origin_is_noop() {
        let state = abc();
        let store = MemStore::default();
        let committer = Committer::default();
        for index in [1, 2] {
            let plan = committer
                .commit(&store, &state, &dragging(2, LIST_X, 1), &to(LIST_X, index))
                .await
                .unwrap();
            assert!(plan.is_none());
        }
        assert!(store.writes.borrow().is_empty());
        assert_eq!(state.seq(LIST_X), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_move_into_middle_uses_midpoint() {
        let state = abc();
        let store = MemStore::default();
        Committer::default()
            .commit(&store, &state, &dragging(3, LIST_X, 2), &to(LIST_X, 1))
            .await
            .unwrap();
        assert_eq!(state.get(3).order, 1.5);
        assert_eq!(state.seq(LIST_X), vec![1, 3, 2]);
    }

    #[tokio::test]
    async fn test_move_to_empty_list() {
        let state = abc();
        let store = MemStore::default();
        Committer::default()
            .commit(&store, &state, &dragging(2, LIST_X, 1), &to(LIST_Y, 0))
            .await
            .unwrap();

        let moved = state.get(2);
        assert_eq!(moved.container, LIST_Y);
        assert_eq!(moved.order, 1.0);
        assert_eq!(state.get(1).order, 1.0);
        assert_eq!(state.get(3).order, 3.0);
        assert_eq!(state.seq(LIST_X), vec![1, 3]);
        assert_eq!(store.writes.borrow().as_slice(), &[(2, 1.0, Some(LIST_Y))]);
    }

    #[tokio::test]
    async fn test_rejected_write_rolls_back_parent_and_order() {
        let state = abc();
        let store = MemStore::default();
        store.fail_after.set(Some(0));
        let err = Committer::default()
            .commit(&store, &state, &dragging(2, LIST_X, 1), &to(LIST_Y, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, ReorderError::Persistence(_)));
        let item = state.get(2);
        assert_eq!(item.container, LIST_X);
        assert_eq!(item.order, 2.0);
        assert_eq!(state.seq(LIST_X), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_missing_container_aborts_without_writes() {
        let state = abc();
        let store = MemStore::default();
        let err = Committer::default()
            .commit(&store, &state, &dragging(2, LIST_X, 1), &to(99, 0))
            .await
            .unwrap_err();
        assert_eq!(err, ReorderError::ContainerMissing(99));
        assert!(store.writes.borrow().is_empty());
        assert_eq!(state.seq(LIST_X), vec![1, 2, 3]);
    }

    #[test]
    fn test_archived_siblings_excluded_from_rank() {
        let mut archived = item(9, LIST_X, 1.5);
        archived.archived = true;
        let placements = vec![item(1, LIST_X, 1.0), archived, item(2, LIST_X, 2.0), item(3, LIST_X, 3.0)];
        // Drop item 3 between 1 and 2 (full rank 1)
        let plan = Committer::default()
            .plan(&placements, |_| true, &dragging(3, LIST_X, 2), &to(LIST_X, 1))
            .unwrap()
            .unwrap();
        assert_eq!(plan.after.get(3).unwrap().order, 1.5);
    }

    #[test]
    fn test_exhausted_gap_renormalises_destination() {
        let a = 1.0_f64;
        let b = f64::from_bits(a.to_bits() + 1);
        let mut placements = vec![item(1, LIST_X, a), item(2, LIST_X, b), item(5, LIST_Y, 1.0)];
        let plan = Committer::default()
            .plan(&placements, |_| true, &dragging(5, LIST_Y, 0), &to(LIST_X, 1))
            .unwrap()
            .unwrap();

        assert!(plan.renormalized);
        plan.after.apply_to(&mut placements);
        assert_eq!(sequence(&placements, LIST_X), vec![1, 5, 2]);
        let moved = plan.mutations.iter().find(|m| m.id == 5).unwrap();
        assert_eq!(moved.new_parent, Some(LIST_X));
        assert!(plan.mutations.iter().filter(|m| m.id != 5).all(|m| m.new_parent.is_none()));

        plan.before.apply_to(&mut placements);
        assert_eq!(placements[2], item(5, LIST_Y, 1.0));
    }

    #[tokio::test]
    async fn test_partial_failure_reverts_landed_writes() {
        let a = 1.0_f64;
        let b = f64::from_bits(a.to_bits() + 1);
        let state = MemState::new(vec![item(1, LIST_X, a), item(2, LIST_X, b), item(5, LIST_Y, 1.0)]);
        let store = MemStore::default();
        store.fail_after.set(Some(1));

        let result = Committer::default()
            .commit(&store, &state, &dragging(5, LIST_Y, 0), &to(LIST_X, 1))
            .await;
        assert!(result.is_err());
        assert_eq!(state.seq(LIST_X), vec![1, 2]);
        assert_eq!(state.get(5).container, LIST_Y);
    }

    #[tokio::test]
    async fn test_orders_stay_strict_over_many_moves() {
        let state = MemState::new((1..=6).map(|i| item(i, LIST_X, i as f64)).collect());
        let store = MemStore::default();
        let committer = Committer::default();
        // Repeatedly move the last item to the front
        for _ in 0..60 {
            let seq = state.seq(LIST_X);
            let last = *seq.last().unwrap();
            committer
                .commit(&store, &state, &dragging(last, LIST_X, seq.len() - 1), &to(LIST_X, 0))
                .await
                .unwrap();
            let now = state.seq(LIST_X);
            assert_eq!(now[0], last);
            let items = state.items.borrow();
            let mut orders: Vec<f64> = now
                .iter()
                .map(|id| items.iter().find(|p| p.id == *id).unwrap().order)
                .collect();
            let sorted = orders.clone();
            orders.dedup();
            assert_eq!(orders.len(), sorted.len());
            assert!(sorted.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
