//! Leptos Reorder
//!
//! Pointer-driven drag-and-reorder for Kanban style boards: lists within a
//! board, items within and across lists.
//!
//! The pure engine (`classify`, `resolver`, `session`, `commit`, `render`)
//! has no DOM dependency. [`InteractionContext`] wraps it in signals and
//! [`dom`] binds it to the page.

pub mod classify;
pub mod commit;
pub mod config;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod input;
pub mod order;
pub mod persist;
pub mod render;
pub mod resolver;
pub mod session;
pub mod signals;

pub use classify::{classify, Classification};
pub use commit::{Committer, OrderMutation, Placement, ReorderPlan, ReorderState, Snapshot};
pub use config::DndConfig;
pub use error::{ReorderError, ReorderResult};
pub use geometry::{compute_insertion_index, Axis, Rect, Vector2};
pub use input::{InputEvent, InputSource};
pub use order::{Placed, Reorderable, ORDER_STEP};
pub use persist::{OrderStore, UpdatedEntity};
pub use resolver::{resolve_target, DropArea};
pub use session::{DragEngine, DragPhase, DragSession, DragTarget, EntityKind, EntityRef, Release};
pub use signals::{provide_interaction_context, use_interaction, InteractionContext};
