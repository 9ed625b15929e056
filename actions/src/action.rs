//! §9 redesign note: "Class hierarchies for actions / plan decoders -> a tagged enum of action
//! kinds with a trait/interface `Action { preconditions(), effects(), is_applicable(state),
//! apply(state) }`; no deep inheritance." [`Action`] is that trait; [`ActionKind`] is the tagged
//! enum the decoder (§4.7) classifies plan actions into by name prefix.

use crate::effects::{EmittedEffect, SimulatedEffectFn};
use crate::state_view::StateView;
use agri_planning_api::plan::BoolExpr;
use agri_planning_api::problem::Action as WireAction;

/// The decoder's classification of an action by name prefix (§4.7). Kept here, not only in the
/// decoder, because the action library is the authority on which prefix each of its actions uses.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ActionKind {
    DriveHarvToFieldAndInit,
    DriveHarvToFieldExit,
    DriveTvToFieldAndReserveOverload,
    DriveTvToFieldExit,
    DoOverload,
    DriveToSilo,
    DriveToSiloAndUnload,
    UnloadAtSilo,
    SweepSiloAccess,
}

impl ActionKind {
    /// The name prefix the decoder matches against (§4.7: "classifying each action by its name
    /// prefix"). Multiple concrete action names may share a kind if
    /// `action_decomposition_settings` split it into several more-specific actions.
    pub fn name_prefix(self) -> &'static str {
        match self {
            ActionKind::DriveHarvToFieldAndInit => "drive_harv_to_field_and_init",
            ActionKind::DriveHarvToFieldExit => "drive_harv_to_field_exit",
            ActionKind::DriveTvToFieldAndReserveOverload => "drive_tv_to_field_and_reserve_overload",
            ActionKind::DriveTvToFieldExit => "drive_tv_to_field_exit",
            ActionKind::DoOverload => "do_overload",
            ActionKind::DriveToSilo => "drive_to_silo",
            ActionKind::DriveToSiloAndUnload => "drive_to_silo_and_unload",
            ActionKind::UnloadAtSilo => "unload_at_silo",
            ActionKind::SweepSiloAccess => "sweep_silo_access",
        }
    }

    pub fn classify(action_name: &str) -> Option<ActionKind> {
        const KINDS: &[ActionKind] = &[
            ActionKind::DriveHarvToFieldAndInit,
            ActionKind::DriveHarvToFieldExit,
            ActionKind::DriveTvToFieldAndReserveOverload,
            ActionKind::DriveTvToFieldExit,
            ActionKind::DoOverload,
            ActionKind::DriveToSiloAndUnload,
            ActionKind::DriveToSilo,
            ActionKind::UnloadAtSilo,
            ActionKind::SweepSiloAccess,
        ];
        if action_name.starts_with("overload_") {
            return Some(ActionKind::DoOverload);
        }
        KINDS.iter().copied().find(|k| action_name.starts_with(k.name_prefix()))
    }
}

/// One grounded action the library can generate. `effects()` already reflects the
/// `effects_settings` mode chosen for this action's class at construction time; there is no
/// further mode parameter at call time (§9: "no reflection", a single construction-time decision).
pub trait Action {
    fn name(&self) -> &str;
    fn kind(&self) -> ActionKind;
    fn is_durative(&self) -> bool;
    fn preconditions(&self) -> &[BoolExpr];
    fn effects(&self) -> &[EmittedEffect];
    fn simulated_effect(&self) -> Option<SimulatedEffectFn>;

    /// `true` if every precondition this action declares is satisfied in `state`, given concrete
    /// `params` (object names in declared-parameter order). A `false` here is what causes the
    /// planner to backtrack (§4.2 "Failure semantics").
    fn is_applicable(&self, state: &dyn StateView, params: &[String]) -> bool {
        let _ = (state, params);
        true
    }

    fn to_wire(&self) -> WireAction;
}

/// A straightforward [`Action`] built once at construction time and never mutated afterwards;
/// every concrete action in `crate::catalogue` is one of these rather than a bespoke type, since
/// none of them need per-instance dynamic behavior beyond what `effects()`/`preconditions()`
/// already capture.
pub struct BuiltAction {
    pub name: String,
    pub kind: ActionKind,
    pub durative: bool,
    pub preconditions: Vec<BoolExpr>,
    pub effects: Vec<EmittedEffect>,
    pub simulated_effect: Option<SimulatedEffectFn>,
    pub wire: WireAction,
}

impl Action for BuiltAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ActionKind {
        self.kind
    }

    fn is_durative(&self) -> bool {
        self.durative
    }

    fn preconditions(&self) -> &[BoolExpr] {
        &self.preconditions
    }

    fn effects(&self) -> &[EmittedEffect] {
        &self.effects
    }

    fn simulated_effect(&self) -> Option<SimulatedEffectFn> {
        self.simulated_effect.clone()
    }

    fn to_wire(&self) -> WireAction {
        self.wire.clone()
    }
}

/// Builds the `planning_failed` precondition every action carries (§4.2 "Failure semantics":
/// "A dedicated `planning_failed` boolean fluent is a precondition on every action").
pub fn planning_not_failed_precondition() -> BoolExpr {
    BoolExpr::fluent("planning_failed", vec![]).not()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_prefixes() {
        assert_eq!(
            ActionKind::classify("drive_harv_to_field_and_init_h1_f2"),
            Some(ActionKind::DriveHarvToFieldAndInit)
        );
        assert_eq!(ActionKind::classify("do_overload_field_finished_h1_tv2"), Some(ActionKind::DoOverload));
        assert_eq!(
            ActionKind::classify("drive_to_silo_and_unload_wait_tv1"),
            Some(ActionKind::DriveToSiloAndUnload)
        );
    }

    #[test]
    fn drive_to_silo_without_unload_is_not_mistaken_for_the_combined_variant() {
        assert_eq!(ActionKind::classify("drive_to_silo_tv1"), Some(ActionKind::DriveToSilo));
    }

    #[test]
    fn unknown_action_name_does_not_classify() {
        assert_eq!(ActionKind::classify("teleport_tv1"), None);
    }

    #[test]
    fn sequential_overload_name_classifies_as_do_overload() {
        assert_eq!(ActionKind::classify("overload_field_finished_h1_tv2"), Some(ActionKind::DoOverload));
    }
}
