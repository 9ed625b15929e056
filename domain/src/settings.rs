//! The settings surface (§6): a closed enumeration the core reads and nothing else. Modeled as an
//! exhaustive-enum-fields struct per the §9 redesign note ("Dynamic attribute copying for config
//! objects -> a settings struct with exhaustive enum fields; a single loader function maps a
//! key-value dictionary to fields. No reflection.").

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum PlanningType {
    Sequential,
    Temporal,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum SiloPlanningType {
    WithoutSiloAccessAvailability,
    WithSiloAccessAvailability,
    WithSiloAccessCapacityAndCompaction,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum HarvConditionsAtTvArrival {
    AtTvStart,
    AtTvArrival,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum NumericFluentBoundsOption {
    None,
    Default,
    ProblemSpecific,
}

/// §4.2's five effect emission modes, selectable per action class.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum EffectsMode {
    NormalOnly,
    NormalAndConditional,
    NormalAndSimulated,
    SimulatedOnly,
    SimulatedWhereRequired,
}

/// §6 `action_decomposition_settings`: emit one general action, or several more-specific ones
/// (e.g. field-finished vs not-finished variants of `do_overload`).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum ActionDecomposition {
    General,
    Decomposed,
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct EffectsSettings {
    pub drive_harv_to_field: EffectsMode,
    pub drive_tv_to_field: EffectsMode,
    pub do_overload: EffectsMode,
    pub drive_to_silo: EffectsMode,
    pub unload_at_silo: EffectsMode,
    pub sweep_silo_access: EffectsMode,
}

impl Default for EffectsSettings {
    fn default() -> Self {
        EffectsSettings {
            drive_harv_to_field: EffectsMode::NormalAndSimulated,
            drive_tv_to_field: EffectsMode::NormalAndSimulated,
            do_overload: EffectsMode::NormalAndSimulated,
            drive_to_silo: EffectsMode::NormalAndSimulated,
            unload_at_silo: EffectsMode::NormalAndSimulated,
            sweep_silo_access: EffectsMode::NormalAndConditional,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ActionDecompositionSettings {
    pub do_overload: ActionDecomposition,
    pub drive_tv_to_field: ActionDecomposition,
}

impl Default for ActionDecompositionSettings {
    fn default() -> Self {
        ActionDecompositionSettings {
            do_overload: ActionDecomposition::Decomposed,
            drive_tv_to_field: ActionDecomposition::General,
        }
    }
}

/// §4.2 "Control windows": seconds; `<= 0` disables that window.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ControlWindows {
    pub enable_overload_after_field_arrival: f64,
    pub enable_drive_after_overload: f64,
    pub enable_unload_after_silo_arrival: f64,
}

impl Default for ControlWindows {
    fn default() -> Self {
        ControlWindows {
            enable_overload_after_field_arrival: 2.0,
            enable_drive_after_overload: 2.0,
            enable_unload_after_silo_arrival: 2.0,
        }
    }
}

/// §4.2 "Cost windows": seconds; `<= 0` disables that heuristic activation.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CostWindows {
    pub waiting_to_overload: f64,
    pub waiting_to_unload: f64,
}

impl Default for CostWindows {
    fn default() -> Self {
        CostWindows {
            waiting_to_overload: 60.0,
            waiting_to_unload: 60.0,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum TemporalOptimizationSetting {
    None,
    Makespan,
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SequentialOptimizationSettings {
    pub k_harv_waiting_time: f64,
    pub k_tv_waiting_time: f64,
}

impl SequentialOptimizationSettings {
    pub fn is_active(&self) -> bool {
        self.k_harv_waiting_time > 0.0 || self.k_tv_waiting_time > 0.0
    }
}

impl Default for SequentialOptimizationSettings {
    fn default() -> Self {
        SequentialOptimizationSettings {
            k_harv_waiting_time: 0.0,
            k_tv_waiting_time: 0.0,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ProblemSettings {
    pub planning_type: PlanningType,
    pub silo_planning_type: SiloPlanningType,
    pub with_harv_conditions_and_effects_at_tv_arrival: HarvConditionsAtTvArrival,
    pub with_drive_to_field_exit: bool,
    pub numeric_fluent_bounds_option: NumericFluentBoundsOption,
    pub infield_transit_duration_to_field_access: f64,
    pub effects_settings: EffectsSettings,
    pub action_decomposition_settings: ActionDecompositionSettings,
    pub control_windows: ControlWindows,
    pub cost_windows: CostWindows,
    pub temporal_optimization_setting: TemporalOptimizationSetting,
    pub sequential_optimization_settings: SequentialOptimizationSettings,
}

impl Default for ProblemSettings {
    fn default() -> Self {
        ProblemSettings {
            planning_type: PlanningType::Temporal,
            silo_planning_type: SiloPlanningType::WithoutSiloAccessAvailability,
            with_harv_conditions_and_effects_at_tv_arrival: HarvConditionsAtTvArrival::AtTvStart,
            with_drive_to_field_exit: true,
            numeric_fluent_bounds_option: NumericFluentBoundsOption::Default,
            infield_transit_duration_to_field_access: 30.0,
            effects_settings: EffectsSettings::default(),
            action_decomposition_settings: ActionDecompositionSettings::default(),
            control_windows: ControlWindows::default(),
            cost_windows: CostWindows::default(),
            temporal_optimization_setting: TemporalOptimizationSetting::None,
            sequential_optimization_settings: SequentialOptimizationSettings::default(),
        }
    }
}

impl ProblemSettings {
    pub fn is_temporal(&self) -> bool {
        matches!(self.planning_type, PlanningType::Temporal)
    }

    /// §9 "a single loader function maps a key-value dictionary to fields. No reflection."
    /// Unrecognized keys are ignored rather than erroring: a campaign file (out of scope) may
    /// carry options this core doesn't read.
    pub fn from_map(values: &HashMap<String, String>) -> ProblemSettings {
        let mut settings = ProblemSettings::default();
        if let Some(v) = values.get("planning_type") {
            settings.planning_type = match v.as_str() {
                "SEQUENTIAL" => PlanningType::Sequential,
                "TEMPORAL" => PlanningType::Temporal,
                _ => settings.planning_type,
            };
        }
        if let Some(v) = values.get("silo_planning_type") {
            settings.silo_planning_type = match v.as_str() {
                "WITHOUT_SILO_ACCESS_AVAILABILITY" => SiloPlanningType::WithoutSiloAccessAvailability,
                "WITH_SILO_ACCESS_AVAILABILITY" => SiloPlanningType::WithSiloAccessAvailability,
                "WITH_SILO_ACCESS_CAPACITY_AND_COMPACTION" => SiloPlanningType::WithSiloAccessCapacityAndCompaction,
                _ => settings.silo_planning_type,
            };
        }
        if let Some(v) = values.get("with_drive_to_field_exit") {
            settings.with_drive_to_field_exit = v == "true";
        }
        if let Some(v) = values.get("infield_transit_duration_to_field_access") {
            if let Ok(parsed) = v.parse() {
                settings.infield_transit_duration_to_field_access = parsed;
            }
        }
        if let Some(v) = values.get("temporal_optimization_setting") {
            settings.temporal_optimization_setting = match v.as_str() {
                "MAKESPAN" => TemporalOptimizationSetting::Makespan,
                _ => TemporalOptimizationSetting::None,
            };
        }
        if let Some(v) = values.get("sequential_optimization_settings.k_harv_waiting_time") {
            if let Ok(parsed) = v.parse() {
                settings.sequential_optimization_settings.k_harv_waiting_time = parsed;
            }
        }
        if let Some(v) = values.get("sequential_optimization_settings.k_tv_waiting_time") {
            if let Ok(parsed) = v.parse() {
                settings.sequential_optimization_settings.k_tv_waiting_time = parsed;
            }
        }
        settings
    }
}
