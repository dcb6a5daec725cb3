//! Adboard domain crate.
//!
//! Pure campaign-dashboard logic with no I/O: entity projections of the
//! ads platform's objects, the status resolver, the list filter/sort
//! pipeline, the budget-edit state machine, optimistic command
//! application, and the manual-refresh cooldown gate. Evaluation is done
//! against pre-loaded data passed in by the caller; fetching and
//! persistence live in the `meta`, `db`, and `api` crates.

pub mod budget;
pub mod command;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod refresh;
pub mod status;
pub mod targeting;
pub mod types;
