//! `pricelens-recon` — Open-PO vs Workbench price reconciliation engine.
//!
//! Pure engine crate: receives typed extract rows, returns a ranked
//! impact table plus summary insights. No CLI or terminal dependencies.

pub mod config;
pub mod currency;
pub mod engine;
pub mod error;
pub mod export;
pub mod ingest;
pub mod insights;
pub mod model;

pub use config::EngineConfig;
pub use engine::{reconcile, run};
pub use error::ReconError;
pub use model::{OpenPoRecord, ReconResult, ReconciledRecord, WorkbenchRecord};
