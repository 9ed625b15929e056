//! §4.6 "A weighted heuristic combines a fixed set with positive coefficients (the weights)."

use crate::heuristic::Heuristic;
use agri_planning_actions::state_view::StateView;
use agri_planning_domain::domain::Domain;

pub struct WeightedHeuristic {
    name: String,
    components: Vec<(Box<dyn Heuristic + Send + Sync>, f64)>,
}

impl WeightedHeuristic {
    /// Panics on a non-positive weight: `f64::INFINITY * 0.0` is NaN, which would silently break
    /// control heuristics that rely on propagating infinity through the weighted sum.
    pub fn new(name: impl Into<String>, components: Vec<(Box<dyn Heuristic + Send + Sync>, f64)>) -> Self {
        for (h, weight) in &components {
            assert!(*weight > 0.0, "heuristic {} has a non-positive weight {weight}", h.name());
        }
        WeightedHeuristic { name: name.into(), components }
    }
}

impl Heuristic for WeightedHeuristic {
    fn name(&self) -> &str {
        &self.name
    }

    fn cost(&self, domain: &Domain, state: &dyn StateView) -> f64 {
        self.components.iter().map(|(h, weight)| weight * h.cost(domain, state)).sum()
    }
}
