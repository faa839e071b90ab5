//! Engine tuning

use crate::order::ORDER_STEP;

/// Tuning knobs for the interaction engine
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DndConfig {
    /// Pointer travel (px) needed to turn a press into a drag.
    /// Zero means any movement at all.
    pub move_threshold_px: f64,
    /// Spacing used for fresh order values and renormalisation
    pub order_step: f64,
}

impl Default for DndConfig {
    fn default() -> Self {
        Self {
            move_threshold_px: 0.0,
            order_step: ORDER_STEP,
        }
    }
}
