//! The effects handler (§4.2): accumulates `(timing, fluent, value, optional condition,
//! value_applies_in_sim_effect)` tuples, then emits them in one of five modes selectable per
//! action. A [`SimulatedEffectFn`] is the callback form: `(problem, state, params) -> Vec<Atom>`,
//! one value per declared affected fluent, in declaration order (§5 "Ordering guarantees").

use agri_planning_api::expression::Atom;
use agri_planning_api::plan::BoolExpr;
use agri_planning_api::problem::Timing;
use agri_planning_domain::settings::EffectsMode;
use std::sync::Arc;

/// One accumulated effect before mode-selection decides how it is emitted.
#[derive(Clone)]
pub struct EffectEntry {
    pub timing: Timing,
    pub fluent: String,
    pub fluent_params: Vec<Atom>,
    /// `None` when the value is only known through the action's simulated effect.
    pub value: Option<Atom>,
    pub condition: Option<BoolExpr>,
    /// Whether this fluent's final value is allowed to come from the simulated-effect callback
    /// when mode 5 (`SimulatedWhereRequired`) decides a syntactic value is insufficient.
    pub value_applies_in_sim_effect: bool,
}

/// A simulated-effect callback, §4.2: "receives (problem, state, parameter bindings) and returns
/// a vector of fluent values, one per declared affected fluent, in declaration order." The
/// `problem`/`state` arguments are erased to `&dyn std::any::Any` here since this crate doesn't
/// own a concrete planner `Problem`/`State` type (§1 Non-goals: the search engine is external);
/// a planner adapter downcasts them to its own types.
pub type SimulatedEffectFn = Arc<
    dyn Fn(&dyn std::any::Any, &dyn crate::state_view::StateView, &[Atom]) -> Vec<Atom> + Send + Sync,
>;

#[derive(Default)]
pub struct EffectsHandler {
    entries: Vec<EffectEntry>,
    simulated: Option<SimulatedEffectFn>,
}

/// One fully resolved effect, ready to attach to a wire [`agri_planning_api::problem::Action`].
pub struct EmittedEffect {
    pub timing: Timing,
    pub fluent: String,
    pub fluent_params: Vec<Atom>,
    pub value: Option<Atom>,
    pub condition: Option<BoolExpr>,
    /// True if this effect's value must come from the simulated-effect callback rather than the
    /// `value` field (modes 3, 4 and the qualifying entries of mode 5).
    pub is_simulated: bool,
}

impl EffectsHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: EffectEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    pub fn with_simulated(&mut self, f: SimulatedEffectFn) -> &mut Self {
        self.simulated = Some(f);
        self
    }

    pub fn simulated_effect(&self) -> Option<SimulatedEffectFn> {
        self.simulated.clone()
    }

    /// Emits accumulated entries per the five modes in §4.2.
    pub fn emit(&self, mode: EffectsMode) -> Vec<EmittedEffect> {
        match mode {
            EffectsMode::NormalOnly => self
                .entries
                .iter()
                .filter(|e| e.condition.is_none())
                .map(|e| as_normal(e, false))
                .collect(),
            EffectsMode::NormalAndConditional => self.entries.iter().map(|e| as_normal(e, false)).collect(),
            EffectsMode::NormalAndSimulated => self
                .entries
                .iter()
                .map(|e| {
                    let needs_sim = e.value.is_none();
                    as_normal(e, needs_sim)
                })
                .collect(),
            EffectsMode::SimulatedOnly => self.entries.iter().map(|e| as_normal(e, true)).collect(),
            EffectsMode::SimulatedWhereRequired => self
                .entries
                .iter()
                .map(|e| {
                    let needs_sim = e.condition.is_some() || e.value.is_none() || e.value_applies_in_sim_effect;
                    as_normal(e, needs_sim)
                })
                .collect(),
        }
    }
}

fn as_normal(e: &EffectEntry, is_simulated: bool) -> EmittedEffect {
    EmittedEffect {
        timing: e.timing.clone(),
        fluent: e.fluent.clone(),
        fluent_params: e.fluent_params.clone(),
        value: if is_simulated { None } else { e.value.clone() },
        condition: e.condition.clone(),
        is_simulated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_planning_api::problem::Timing;

    fn entry(value: Option<Atom>, condition: Option<BoolExpr>) -> EffectEntry {
        EffectEntry {
            timing: Timing::end(),
            fluent: "tv_bunker_mass".to_string(),
            fluent_params: vec![Atom::symbol("tv_1")],
            value,
            condition,
            value_applies_in_sim_effect: false,
        }
    }

    #[test]
    fn normal_only_drops_conditional_entries() {
        let mut h = EffectsHandler::new();
        h.push(entry(Some(Atom::real(1.0)), None));
        h.push(entry(Some(Atom::real(2.0)), Some(BoolExpr::fluent("tv_free", vec![]))));
        assert_eq!(h.emit(EffectsMode::NormalOnly).len(), 1);
    }

    #[test]
    fn normal_and_simulated_marks_unset_values_as_simulated() {
        let mut h = EffectsHandler::new();
        h.push(entry(None, None));
        let emitted = h.emit(EffectsMode::NormalAndSimulated);
        assert_eq!(emitted.len(), 1);
        assert!(emitted[0].is_simulated);
    }

    #[test]
    fn simulated_only_marks_every_entry_simulated_regardless_of_value() {
        let mut h = EffectsHandler::new();
        h.push(entry(Some(Atom::real(1.0)), None));
        let emitted = h.emit(EffectsMode::SimulatedOnly);
        assert!(emitted[0].is_simulated);
        assert!(emitted[0].value.is_none());
    }

    #[test]
    fn simulated_where_required_only_flags_conditional_or_unset_entries() {
        let mut h = EffectsHandler::new();
        h.push(entry(Some(Atom::real(1.0)), None));
        h.push(entry(Some(Atom::real(2.0)), Some(BoolExpr::fluent("tv_free", vec![]))));
        let emitted = h.emit(EffectsMode::SimulatedWhereRequired);
        assert!(!emitted[0].is_simulated);
        assert!(emitted[1].is_simulated);
    }
}
