//! Control and cost windows (§4.2 "Control windows (temporal only)" / "Cost windows (temporal
//! only)"). Both are pairs of boolean effects opened by a predecessor action's end and consumed or
//! expiring a fixed duration later; the difference is only in what consuming them gates
//! (hard-constrains a successor action vs. activates a heuristic penalty).

use crate::effects::EffectEntry;
use agri_planning_api::expression::Atom;
use agri_planning_api::problem::Timing;

/// A short boolean window: opened at `opens_at` (usually `Timing::end()` of the predecessor
/// action) and implicitly closed `duration_s` later. `duration_s <= 0` means the window is
/// disabled for this settings profile (§6 `control_windows.*` / `cost_windows.*`).
pub struct Window {
    pub fluent: String,
    pub params: Vec<Atom>,
    pub duration_s: f64,
}

impl Window {
    pub fn is_enabled(&self) -> bool {
        self.duration_s > 0.0
    }

    /// The two boolean effects that open then close the window, for an action whose end
    /// coincides with `Timing::end()`. A disabled window degenerates to no effects at all: the
    /// caller must still gate the action on `is_enabled()` before trusting the window as a hard
    /// constraint, per §6 "`control_windows.*` ... `<=0` disables that window."
    pub fn open_and_close_effects(&self) -> Vec<EffectEntry> {
        if !self.is_enabled() {
            return vec![];
        }
        vec![
            EffectEntry {
                timing: Timing::end(),
                fluent: self.fluent.clone(),
                fluent_params: self.params.clone(),
                value: Some(Atom::boolean(true)),
                condition: None,
                value_applies_in_sim_effect: false,
            },
            EffectEntry {
                timing: Timing::end_minus(-self.duration_s),
                fluent: self.fluent.clone(),
                fluent_params: self.params.clone(),
                value: Some(Atom::boolean(false)),
                condition: None,
                value_applies_in_sim_effect: false,
            },
        ]
    }
}
