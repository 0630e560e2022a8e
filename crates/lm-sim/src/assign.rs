//! The assignment engine: picker selection, courier dispatch, and the
//! courier return cycle.
//!
//! # Timing rules
//!
//! ```text
//! picker.available   = max(picker.available, now) + commission
//! depart             = max(now, courier.available, picker.available)
//! arrival            = depart + travel(client, warehouse)
//! courier.available  = arrival + service + travel(client, warehouse)   (on completion)
//! ```
//!
//! Every dispatch logs a warehouse → client leg `[depart, arrival]`; every
//! completion logs a client → warehouse leg `[arrival, courier.available]`.

use log::debug;

use lm_core::{CourierId, OrderId, PickerId, SimTime, WarehouseId};
use lm_fleet::{OrderStatus, Registry, Route};
use lm_network::TravelModel;

use crate::{RunState, SimError, SimResult};

/// Applies routing decisions to the registry.
///
/// The only writer of picker/courier availability, warehouse courier lists
/// and backlogs during a run.
pub struct AssignmentEngine<T: TravelModel> {
    travel: T,
}

impl<T: TravelModel> AssignmentEngine<T> {
    pub fn new(travel: T) -> Self {
        Self { travel }
    }

    #[inline]
    pub fn travel(&self) -> &T {
        &self.travel
    }

    /// Take `order` into `warehouse`: assign a picker, then dispatch a
    /// courier if one is present or append the order to the backlog.
    pub fn accept(
        &self,
        reg:       &mut Registry,
        state:     &mut RunState,
        order:     OrderId,
        warehouse: WarehouseId,
        now:       SimTime,
    ) -> SimResult<()> {
        {
            let o = reg.order_mut(order)?;
            o.warehouse = Some(warehouse);
            o.status = OrderStatus::Assigned;
        }
        self.assign_picker(reg, order, warehouse, now)?;

        if reg.warehouse(warehouse)?.couriers.is_empty() {
            reg.warehouse_mut(warehouse)?.backlog.push_back(order);
            reg.order_mut(order)?.status = OrderStatus::Backlogged;
            debug!("{order} backlogged at {warehouse}");
        } else {
            self.dispatch_courier(reg, state, order, now)?;
        }
        Ok(())
    }

    /// Give `order` to the picker of `warehouse` that frees up first.
    pub fn assign_picker(
        &self,
        reg:       &mut Registry,
        order:     OrderId,
        warehouse: WarehouseId,
        now:       SimTime,
    ) -> SimResult<PickerId> {
        let picker = reg
            .fastest_picker(warehouse)?
            .ok_or(SimError::EmptyPool { pool: "pickers", warehouse })?;
        let commission = reg.order(order)?.commission_secs;

        let p = reg.picker_mut(picker)?;
        p.available_at = p.available_at.max(now) + commission;
        reg.order_mut(order)?.picker = Some(picker);
        Ok(picker)
    }

    /// Send the fastest present courier of the order's warehouse out.
    ///
    /// The order must already have a warehouse and a picker.  It is removed
    /// from the backlog if it was waiting there.
    pub fn dispatch_courier(
        &self,
        reg:   &mut Registry,
        state: &mut RunState,
        order: OrderId,
        now:   SimTime,
    ) -> SimResult<CourierId> {
        let (warehouse, picker, client, location) = {
            let o = reg.order(order)?;
            (
                o.warehouse.ok_or(SimError::Unassigned { order, what: "warehouse" })?,
                o.picker.ok_or(SimError::Unassigned { order, what: "picker" })?,
                o.client,
                o.location,
            )
        };
        let courier = reg
            .fastest_courier(warehouse)?
            .ok_or(SimError::EmptyPool { pool: "couriers", warehouse })?;

        let ready = reg.courier(courier)?.available_at.max(reg.picker(picker)?.available_at);
        let depart = now.max(ready);
        let arrival = depart + self.travel.travel_secs(client, warehouse);

        let origin = reg.warehouse(warehouse)?.location;
        reg.push_route(Route::new(depart, arrival, origin, location));
        reg.detach_courier(courier, order)?;

        let wh = reg.warehouse_mut(warehouse)?;
        if let Some(pos) = wh.backlog.iter().position(|&o| o == order) {
            wh.backlog.remove(pos);
        }

        let o = reg.order_mut(order)?;
        o.courier = Some(courier);
        o.arrival_at = Some(arrival);
        o.status = OrderStatus::InFlight;

        state.in_flight.insert(arrival, order);
        state.sync_next_completion();
        state.raise_latest_arrival(arrival);
        debug!("{order}: {courier} departs {warehouse} at {depart}, arrives {arrival}");
        Ok(courier)
    }

    /// Deliver `order`, send its courier home and, if that warehouse has a
    /// backlog, dispatch the oldest backlogged order.
    ///
    /// Returns the backlogged order that was dispatched, if any.
    pub fn complete(
        &self,
        reg:   &mut Registry,
        state: &mut RunState,
        order: OrderId,
        now:   SimTime,
    ) -> SimResult<Option<OrderId>> {
        let (courier, warehouse, client, location, arrival, service, ordered_at) = {
            let o = reg.order(order)?;
            (
                o.courier.ok_or(SimError::Unassigned { order, what: "courier" })?,
                o.warehouse.ok_or(SimError::Unassigned { order, what: "warehouse" })?,
                o.client,
                o.location,
                o.arrival_at.ok_or(SimError::Unassigned { order, what: "arrival time" })?,
                o.service_secs,
                o.ordered_at,
            )
        };

        let back = arrival + service + self.travel.travel_secs(client, warehouse);
        let home = reg.warehouse(warehouse)?.location;
        reg.push_route(Route::new(arrival, back, location, home));

        reg.courier_mut(courier)?.available_at = back;
        let carried = reg.attach_courier(courier)?;
        if carried != Some(order) {
            return Err(SimError::Invariant(format!(
                "{courier} returned carrying {carried:?}, expected {order}"
            )));
        }
        reg.order_mut(order)?.status = OrderStatus::Delivered;

        let waiting = arrival.saturating_since(ordered_at);
        state.served += 1;
        state.total_waiting_secs += waiting;
        state.max_waiting_secs = state.max_waiting_secs.max(waiting);
        state.raise_latest_arrival(back);

        if !state.in_flight.remove(order) {
            return Err(SimError::Invariant(format!("{order} completed but was not in flight")));
        }
        state.sync_next_completion();

        let next = reg.warehouse(warehouse)?.backlog.front().copied();
        if let Some(next) = next {
            self.dispatch_courier(reg, state, next, now)?;
        }
        Ok(next)
    }
}
