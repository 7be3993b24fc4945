use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::engine::Lot;

/// Cost-basis selection method: which open lots a sale draws against first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostBasisMethod {
    /// First in, first out - oldest lots first (most common)
    Fifo,
    /// Last in, first out - newest lots first
    Lifo,
    /// Highest in, first out - highest-cost lots first (minimizes gains)
    Hifo,
}

impl CostBasisMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostBasisMethod::Fifo => "FIFO",
            CostBasisMethod::Lifo => "LIFO",
            CostBasisMethod::Hifo => "HIFO",
        }
    }

    /// Order candidate lot indices according to this method.
    ///
    /// `indices` arrive in acquisition (FIFO) order; all sorts are stable,
    /// so ties keep that order and matching stays deterministic.
    pub(crate) fn order_lots(&self, indices: &mut [usize], pool: &[Lot]) {
        match self {
            CostBasisMethod::Fifo => {
                indices.sort_by_key(|&i| pool[i].acquired_at);
            }
            CostBasisMethod::Lifo => {
                indices.sort_by(|&a, &b| pool[b].acquired_at.cmp(&pool[a].acquired_at));
            }
            CostBasisMethod::Hifo => {
                indices.sort_by(|&a, &b| pool[b].unit_cost.cmp(&pool[a].unit_cost));
            }
        }
    }
}

impl FromStr for CostBasisMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIFO" => Ok(CostBasisMethod::Fifo),
            "LIFO" => Ok(CostBasisMethod::Lifo),
            "HIFO" => Ok(CostBasisMethod::Hifo),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for CostBasisMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
