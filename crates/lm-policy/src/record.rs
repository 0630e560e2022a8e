use lm_core::OrderId;

/// The state a policy saw and the action it took, for one order.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionRecord {
    pub order: OrderId,
    pub features: Vec<f64>,
    /// Index in `0..=warehouses`; `warehouses` means reject.
    pub action: usize,
}
