pub mod config;
pub mod contracts;

pub use config::{CostingConfig, DEFAULT_COST_DECIMALS};
pub use contracts::{
    CostBatchReport, CostFailureView, CostOutcome, CostReport, LineCostView, LinePathEntry,
};
