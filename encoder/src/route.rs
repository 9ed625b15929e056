//! The out-of-field route planner external interface (§6): `get_path`, `get_distance`,
//! `get_duration`. A negative return means "no path." This crate consumes it; it never produces
//! geometry itself (§1 Non-goals: "In-field route geometry generation").

use agri_planning_domain::entities::Point2D;
use agri_planning_domain::ids::MachineId;

pub trait RoutePlanner {
    fn get_path(&self, from: Point2D, to: Point2D, machine: MachineId) -> Vec<Point2D>;

    /// Negative return means "no path."
    fn get_distance(&self, from: Point2D, to: Point2D, machine: MachineId) -> f64;

    /// Negative return means "no path."
    fn get_duration(&self, from: Point2D, to: Point2D, machine: MachineId) -> f64;
}

/// A minimal planner used by tests and by any caller without a real road-network service:
/// straight-line distance, constant speed duration, a two-point path.
pub struct StraightLineRoutePlanner {
    pub speed: f64,
}

impl RoutePlanner for StraightLineRoutePlanner {
    fn get_path(&self, from: Point2D, to: Point2D, _machine: MachineId) -> Vec<Point2D> {
        vec![from, to]
    }

    fn get_distance(&self, from: Point2D, to: Point2D, _machine: MachineId) -> f64 {
        from.distance_to(to)
    }

    fn get_duration(&self, from: Point2D, to: Point2D, _machine: MachineId) -> f64 {
        if self.speed <= 0.0 {
            return -1.0;
        }
        from.distance_to(to) / self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_distance_matches_euclidean() {
        let planner = StraightLineRoutePlanner { speed: 2.0 };
        let d = planner.get_distance(Point2D::new(0.0, 0.0), Point2D::new(3.0, 4.0), MachineId::new(1));
        assert_eq!(d, 5.0);
        assert_eq!(planner.get_duration(Point2D::new(0.0, 0.0), Point2D::new(3.0, 4.0), MachineId::new(1)), 2.5);
    }

    #[test]
    fn zero_speed_duration_signals_no_path() {
        let planner = StraightLineRoutePlanner { speed: 0.0 };
        assert!(planner.get_duration(Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0), MachineId::new(1)) < 0.0);
    }
}
