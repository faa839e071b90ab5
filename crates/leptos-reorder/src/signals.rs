//! Interaction context
//!
//! The engine wrapped in Leptos signals. One context is created at the
//! application root and handed to every list and item view; the views read
//! it reactively and forward their events to it.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, warn};

use crate::classify::Classification;
use crate::commit::{Committer, ReorderState};
use crate::config::DndConfig;
use crate::dom;
use crate::error::ReorderError;
use crate::geometry::{Rect, Vector2};
use crate::input::InputEvent;
use crate::persist::OrderStore;
use crate::render;
use crate::resolver::{resolve_target, DropArea};
use crate::session::{DragEngine, DragPhase, DragSession, DragTarget, EntityKind, EntityRef, Release};

/// Gives input focus back to a list or item once its session ends
pub type FocusRestorer = Rc<dyn Fn(EntityKind, u32)>;

/// Background order write started by a committed release
pub type PendingWrite = Pin<Box<dyn Future<Output = ()>>>;

/// Shared drag state plus the committer that finishes drags
#[derive(Clone, Copy)]
pub struct InteractionContext {
    engine: RwSignal<DragEngine>,
    pointer: RwSignal<Vector2>,
    committer: Committer,
    focus: StoredValue<FocusRestorer, LocalStorage>,
}

impl InteractionContext {
    /// Context that restores focus through the page
    pub fn new(config: DndConfig) -> Self {
        Self::with_focus_restorer(config, dom::focus_entity)
    }

    pub fn with_focus_restorer(config: DndConfig, focus: impl Fn(EntityKind, u32) + 'static) -> Self {
        let focus: FocusRestorer = Rc::new(focus);
        Self {
            engine: RwSignal::new(DragEngine::new(config)),
            pointer: RwSignal::new(Vector2::default()),
            committer: Committer::new(config),
            focus: StoredValue::new_local(focus),
        }
    }

    fn restore_focus(&self, kind: EntityKind, id: u32) {
        let focus = self.focus.get_value();
        focus(kind, id);
    }

    /// Run `f` against the engine, notifying subscribers only when it changed
    fn mutate<U>(&self, f: impl FnOnce(&mut DragEngine) -> U) -> Option<U> {
        let mut out = None;
        self.engine.maybe_update(|engine| {
            let before = engine.clone();
            out = Some(f(engine));
            *engine != before
        });
        out
    }

    // ========================
    // Reactive reads
    // ========================

    pub fn session(&self) -> Option<DragSession> {
        self.engine.with(|e| e.session().cloned())
    }

    pub fn target(&self) -> Option<DragTarget> {
        self.engine.with(|e| e.target())
    }

    pub fn phase(&self) -> DragPhase {
        self.engine.with(|e| e.phase())
    }

    /// Kind of the entity being dragged, read without tracking
    pub fn dragged_kind(&self) -> Option<EntityKind> {
        self.engine
            .with_untracked(|e| e.session().filter(|s| s.dragging).map(|s| s.kind))
    }

    /// Last pointer position seen during a session
    pub fn pointer(&self) -> Vector2 {
        self.pointer.get()
    }

    pub fn is_dragged(&self, kind: EntityKind, id: u32) -> bool {
        self.engine.with(|e| render::is_dragged(e.session(), kind, id))
    }

    pub fn is_selected(&self, kind: EntityKind, id: u32) -> bool {
        self.engine.with(|e| render::is_selected(e.session(), kind, id))
    }

    /// Gap in front of the sibling at full display `rank`
    pub fn gap_before(&self, kind: EntityKind, container: u32, rank: usize) -> bool {
        self.engine.with(|e| render::gap_before(e.session(), e.target(), kind, container, rank))
    }

    pub fn trailing_gap(&self, kind: EntityKind, container: u32, count: usize) -> bool {
        self.engine.with(|e| render::trailing_gap(e.session(), e.target(), kind, container, count))
    }

    pub fn container_state(&self, kind: EntityKind, container: u32, count: usize) -> render::ContainerState {
        self.engine
            .with(|e| render::ContainerState::derive(e.session(), e.target(), kind, container, count))
    }

    // ========================
    // Event entry points
    // ========================

    /// Press or key on a list/item element
    pub fn begin_or_select(&self, event: &InputEvent, entity: EntityRef, rect: Option<Rect>) -> Classification {
        let class = self
            .mutate(|e| e.begin_or_select(event, entity, rect))
            .unwrap_or(Classification::Ignore);
        if class == Classification::BeginDrag {
            if let Some(position) = event.position() {
                self.pointer.set(position);
            }
        }
        class
    }

    /// Pointer moved anywhere on the page. Returns whether a drag is running.
    pub fn pointer_moved(&self, position: Vector2, primary_held: bool) -> bool {
        if self.engine.with_untracked(|e| e.session().is_none()) {
            return false;
        }
        let dragging = self
            .mutate(|e| e.pointer_moved(position, primary_held))
            .unwrap_or(false);
        if dragging {
            self.pointer.set(position);
        }
        dragging
    }

    /// Re-resolve the target against the drop area under the pointer.
    /// No area keeps the previous target.
    pub fn update_drag_target(&self, pointer: Vector2, area: Option<&DropArea>) -> bool {
        let resolved = self.engine.with_untracked(|e| {
            e.session()
                .zip(area)
                .and_then(|(session, area)| resolve_target(pointer, session, area))
        });
        self.mutate(|e| e.update_drag_target(resolved)).unwrap_or(false)
    }

    /// Pointer released. A committed drag is applied to `state` at once and
    /// written to `store` in the background; `on_error` hears about
    /// rejected or aborted commits after state has been rolled back.
    pub fn release_drag<R, S, F>(&self, state: R, store: Rc<S>, on_error: F) -> Release
    where
        R: ReorderState + 'static,
        S: OrderStore + 'static,
        F: Fn(ReorderError) + 'static,
    {
        let (release, pending) = self.settle_release(state, store, on_error);
        if let Some(write) = pending {
            spawn_local(write);
        }
        release
    }

    /// Release without spawning. The write a commit needs, if any, is
    /// handed back to the caller.
    pub fn settle_release<R, S, F>(&self, state: R, store: Rc<S>, on_error: F) -> (Release, Option<PendingWrite>)
    where
        R: ReorderState + 'static,
        S: OrderStore + 'static,
        F: Fn(ReorderError) + 'static,
    {
        let release = self.mutate(|e| e.release()).unwrap_or(Release::Idle);
        let mut pending: Option<PendingWrite> = None;
        match &release {
            Release::Idle | Release::Tap(_) => {}
            Release::Cancel(session) => {
                debug!(kind = %session.kind, id = session.id, "released outside any drop area");
                self.restore_focus(session.kind, session.id);
            }
            Release::Commit { session, target } => {
                let staged = self.committer.stage(&state, session, target);
                self.mutate(|e| e.finish());
                match staged {
                    Ok(Some(plan)) => {
                        let committer = self.committer;
                        let ctx = *self;
                        pending = Some(Box::pin(async move {
                            if let Err(err) = committer.persist(store.as_ref(), &state, &plan).await {
                                ctx.restore_focus(plan.kind, plan.moved);
                                on_error(err);
                            }
                        }));
                    }
                    Ok(None) => {}
                    Err(err) => {
                        warn!(kind = %session.kind, id = session.id, error = %err, "reorder aborted");
                        self.restore_focus(session.kind, session.id);
                        on_error(err);
                    }
                }
            }
        }
        (release, pending)
    }

    /// Escape during a press or drag
    pub fn cancel_drag(&self) -> bool {
        match self.mutate(|e| e.cancel()).flatten() {
            Some(session) => {
                self.restore_focus(session.kind, session.id);
                true
            }
            None => false,
        }
    }

    /// Escape pressed anywhere: ends a press, a drag or an open details
    /// dialog. Returns whether anything was ended.
    pub fn escape(&self) -> bool {
        self.cancel_drag() || self.close_details()
    }

    /// Details dialog closed; focus goes back to the entity. Returns
    /// whether a dialog was open.
    pub fn close_details(&self) -> bool {
        match self.mutate(|e| e.close_details()).flatten() {
            Some(session) => {
                self.restore_focus(session.kind, session.id);
                true
            }
            None => false,
        }
    }
}

/// Create the context and provide it to the component tree
pub fn provide_interaction_context(config: DndConfig) -> InteractionContext {
    let ctx = InteractionContext::new(config);
    provide_context(ctx);
    ctx
}

/// Same as [`provide_interaction_context`] with a custom focus restorer
pub fn provide_interaction_context_with(
    config: DndConfig,
    focus: impl Fn(EntityKind, u32) + 'static,
) -> InteractionContext {
    let ctx = InteractionContext::with_focus_restorer(config, focus);
    provide_context(ctx);
    ctx
}

pub fn use_interaction() -> InteractionContext {
    expect_context::<InteractionContext>()
}
