//! Cycle and fertility prediction engine.
//!
//! Pure, synchronous functions over immutable snapshots: the host app
//! fetches cycle records, OPK results, and BBT readings, runs a refresh,
//! and hands the resulting [`Prediction`] to its calendar, dashboard, and
//! insights screens. No I/O, no clock reads — "today" is always an explicit
//! parameter — so calls are deterministic and safe from any thread.

pub mod config;
pub mod fusion;
pub mod models;
pub mod phase;
pub mod prediction;

pub use config::PredictionConfig;
pub use models::{
    BbtEntry, Confidence, CyclePhase, CycleRecord, FusionOutcome, OpkOutcome, OpkResult,
    Prediction,
};
