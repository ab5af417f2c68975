//! Burn bank dashboard crate.
//!
//! Binds chain metadata, feature flags and the burn bank clients into
//! display-ready snapshots and guarded user transactions.

pub mod chains;
pub mod config;
mod dashboard;
pub mod registry;
mod types;

pub use chains::Chain;
pub use config::DashboardConfig;
pub use dashboard::BurnBankDashboard;
pub use registry::{resolve_contract_list, ContractSourceMode, OfficialRegistry, OfficialTokenConfig};
pub use types::{DashboardSnapshot, SnapshotInputs, UserSnapshot};
