//! `Registry` — per-run arena of every entity.

use std::collections::VecDeque;

use lm_core::{ClientId, CourierId, GeoPoint, OrderId, PickerId, SimTime, WarehouseId};
use lm_network::WarehouseSite;

use crate::{Courier, FleetError, FleetResult, Order, OrderStatus, Picker, Route, Warehouse};

/// Owner of all entities of one simulation run.
///
/// Every `Vec` is indexed by the matching id type:
///
/// ```ignore
/// let courier = &registry.couriers[id.index()];  // O(1)
/// ```
///
/// The fields are `pub` for read access on hot paths.  Mutations that
/// affect the courier location invariant go through
/// [`detach_courier`](Self::detach_courier) / [`attach_courier`](Self::attach_courier).
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub warehouses: Vec<Warehouse>,
    pub couriers:   Vec<Courier>,
    pub pickers:    Vec<Picker>,
    pub orders:     Vec<Order>,
    /// Append-only leg log.
    pub routes:     Vec<Route>,
}

impl Registry {
    /// Create a fresh registry from warehouse sites.
    ///
    /// Couriers and pickers are numbered consecutively across warehouses in
    /// site order, all available from time zero.
    pub fn provision(sites: &[WarehouseSite]) -> Self {
        let mut reg = Registry::default();
        for (w, site) in sites.iter().enumerate() {
            let wid = WarehouseId(w as u32);
            let mut warehouse = Warehouse {
                id:               wid,
                location:         site.location,
                pickers:          Vec::with_capacity(site.pickers as usize),
                couriers:         Vec::with_capacity(site.couriers as usize),
                backlog:          VecDeque::new(),
                initial_couriers: site.couriers as usize,
            };
            for _ in 0..site.couriers {
                let id = CourierId(reg.couriers.len() as u32);
                reg.couriers.push(Courier {
                    id,
                    home:         wid,
                    available_at: SimTime::ZERO,
                    order:        None,
                });
                warehouse.couriers.push(id);
            }
            for _ in 0..site.pickers {
                let id = PickerId(reg.pickers.len() as u32);
                reg.pickers.push(Picker { id, home: wid, available_at: SimTime::ZERO });
                warehouse.pickers.push(id);
            }
            reg.warehouses.push(warehouse);
        }
        reg
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    pub fn warehouse(&self, id: WarehouseId) -> FleetResult<&Warehouse> {
        self.warehouses.get(id.index()).ok_or(FleetError::WarehouseNotFound(id))
    }

    pub fn warehouse_mut(&mut self, id: WarehouseId) -> FleetResult<&mut Warehouse> {
        self.warehouses.get_mut(id.index()).ok_or(FleetError::WarehouseNotFound(id))
    }

    pub fn courier(&self, id: CourierId) -> FleetResult<&Courier> {
        self.couriers.get(id.index()).ok_or(FleetError::CourierNotFound(id))
    }

    pub fn courier_mut(&mut self, id: CourierId) -> FleetResult<&mut Courier> {
        self.couriers.get_mut(id.index()).ok_or(FleetError::CourierNotFound(id))
    }

    pub fn picker(&self, id: PickerId) -> FleetResult<&Picker> {
        self.pickers.get(id.index()).ok_or(FleetError::PickerNotFound(id))
    }

    pub fn picker_mut(&mut self, id: PickerId) -> FleetResult<&mut Picker> {
        self.pickers.get_mut(id.index()).ok_or(FleetError::PickerNotFound(id))
    }

    pub fn order(&self, id: OrderId) -> FleetResult<&Order> {
        self.orders.get(id.index()).ok_or(FleetError::OrderNotFound(id))
    }

    pub fn order_mut(&mut self, id: OrderId) -> FleetResult<&mut Order> {
        self.orders.get_mut(id.index()).ok_or(FleetError::OrderNotFound(id))
    }

    // ── Creation ──────────────────────────────────────────────────────────

    /// Register a newly arrived order and return its sequential id.
    pub fn create_order(
        &mut self,
        client:          ClientId,
        location:        GeoPoint,
        ordered_at:      SimTime,
        commission_secs: u64,
        service_secs:    u64,
    ) -> OrderId {
        let id = OrderId(self.orders.len() as u32);
        self.orders.push(Order {
            id,
            client,
            location,
            ordered_at,
            commission_secs,
            service_secs,
            status:     OrderStatus::Created,
            warehouse:  None,
            picker:     None,
            courier:    None,
            arrival_at: None,
        });
        id
    }

    /// Append a leg to the route log.
    #[inline]
    pub fn push_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    // ── Pool queries ──────────────────────────────────────────────────────

    /// Picker with the smallest availability timestamp.
    ///
    /// Ties go to the first picker in the warehouse's list.  `None` if the
    /// warehouse has no pickers.
    pub fn fastest_picker(&self, warehouse: WarehouseId) -> FleetResult<Option<PickerId>> {
        let wh = self.warehouse(warehouse)?;
        Ok(first_min_by_key(&wh.pickers, |p| self.pickers[p.index()].available_at))
    }

    /// Present courier with the smallest availability timestamp.
    ///
    /// Ties go to the first courier in the present list (couriers re-enter
    /// at the back on return).  `None` if nobody is present.
    pub fn fastest_courier(&self, warehouse: WarehouseId) -> FleetResult<Option<CourierId>> {
        let wh = self.warehouse(warehouse)?;
        Ok(first_min_by_key(&wh.couriers, |c| self.couriers[c.index()].available_at))
    }

    /// Pickers whose availability timestamp is at or before `now`.
    pub fn free_picker_count(&self, warehouse: WarehouseId, now: SimTime) -> FleetResult<usize> {
        let wh = self.warehouse(warehouse)?;
        Ok(wh.pickers.iter().filter(|p| self.pickers[p.index()].is_free(now)).count())
    }

    /// `max(0, fastest picker availability − now)`; 0 when there are no pickers.
    pub fn picker_slack(&self, warehouse: WarehouseId, now: SimTime) -> FleetResult<u64> {
        Ok(self
            .fastest_picker(warehouse)?
            .map_or(0, |p| self.pickers[p.index()].available_at.saturating_since(now)))
    }

    /// `max(0, fastest present courier availability − now)`; 0 when nobody is present.
    pub fn courier_slack(&self, warehouse: WarehouseId, now: SimTime) -> FleetResult<u64> {
        Ok(self
            .fastest_courier(warehouse)?
            .map_or(0, |c| self.couriers[c.index()].available_at.saturating_since(now)))
    }

    /// Couriers based at `warehouse` that are currently out on a delivery.
    pub fn in_flight_count(&self, warehouse: WarehouseId) -> usize {
        self.couriers
            .iter()
            .filter(|c| c.home == warehouse && c.in_flight())
            .count()
    }

    /// Orders that were turned away.
    pub fn rejected_count(&self) -> usize {
        self.orders.iter().filter(|o| o.is_rejected()).count()
    }

    // ── Courier movement ──────────────────────────────────────────────────

    /// Send `courier` out on `order`: remove it from its warehouse's present
    /// list and mark it in flight.
    pub fn detach_courier(&mut self, courier: CourierId, order: OrderId) -> FleetResult<()> {
        let home = self.courier(courier)?.home;
        let wh = self.warehouse_mut(home)?;
        let pos = wh
            .couriers
            .iter()
            .position(|&c| c == courier)
            .ok_or(FleetError::CourierNotPresent { courier, warehouse: home })?;
        wh.couriers.remove(pos);
        self.courier_mut(courier)?.order = Some(order);
        Ok(())
    }

    /// Bring `courier` back to its home warehouse's present list and clear
    /// its in-flight order.  Returns the order it was carrying.
    pub fn attach_courier(&mut self, courier: CourierId) -> FleetResult<Option<OrderId>> {
        let home = self.courier(courier)?.home;
        if self.warehouse(home)?.couriers.contains(&courier) {
            return Err(FleetError::CourierAlreadyPresent(courier));
        }
        let carried = self.courier_mut(courier)?.order.take();
        self.warehouse_mut(home)?.couriers.push(courier);
        Ok(carried)
    }
}

/// First element with the minimum key (strict `<` scan).
fn first_min_by_key<I: Copy, K: Ord>(items: &[I], key: impl Fn(I) -> K) -> Option<I> {
    let mut best: Option<(I, K)> = None;
    for &item in items {
        let k = key(item);
        if best.as_ref().is_none_or(|(_, b)| k < *b) {
            best = Some((item, k));
        }
    }
    best.map(|(item, _)| item)
}
