//! Plain data row types written by output backends.

use lm_core::SimTime;
use lm_fleet::{Order, Route};
use lm_sim::{RunSummary, TrainingPoint};

/// One route leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRow {
    pub start:    u64,
    pub arrival:  u64,
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat:   f64,
    pub to_lon:   f64,
}

impl From<&Route> for RouteRow {
    fn from(r: &Route) -> Self {
        Self {
            start:    r.start.0,
            arrival:  r.arrival.0,
            from_lat: r.from.lat,
            from_lon: r.from.lon,
            to_lat:   r.to.lat,
            to_lon:   r.to.lon,
        }
    }
}

/// One order, as drawn by the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderRow {
    pub ordered_at: u64,
    /// Delivery time; the run's latest arrival for accepted orders never
    /// delivered; `ordered_at + display` for rejected ones.
    pub shown_until: u64,
    pub lat:        f64,
    pub lon:        f64,
    pub accepted:   bool,
}

impl OrderRow {
    pub fn from_order(order: &Order, latest_arrival: SimTime, rejected_display_secs: u64) -> Self {
        let shown_until = if order.accepted() {
            order.arrival_at.filter(|_| order.is_delivered()).unwrap_or(latest_arrival).0
        } else {
            order.ordered_at.0 + rejected_display_secs
        };
        Self {
            ordered_at: order.ordered_at.0,
            shown_until,
            lat:        order.location.lat,
            lon:        order.location.lon,
            accepted:   order.accepted(),
        }
    }
}

/// Per-epoch evaluation statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsRow {
    pub total_costs:       f64,
    pub rejection_rate:    f64,
    pub mean_waiting_secs: u64,
    pub max_waiting_secs:  u64,
}

impl From<&RunSummary> for StatsRow {
    fn from(s: &RunSummary) -> Self {
        Self {
            total_costs:       s.objective as f64,
            rejection_rate:    s.rejection_rate,
            mean_waiting_secs: s.mean_waiting_secs,
            max_waiting_secs:  s.max_waiting_secs,
        }
    }
}

/// Interval averages reported during training.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostsRow {
    pub total_costs:    f64,
    pub rejection_rate: f64,
}

impl From<&TrainingPoint> for CostsRow {
    fn from(p: &TrainingPoint) -> Self {
        Self { total_costs: p.mean_objective, rejection_rate: p.mean_rejection_rate }
    }
}
