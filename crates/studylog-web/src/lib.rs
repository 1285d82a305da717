//! Axum frontend for studylog.
//!
//! Thin layer over [`studylog_core`]: HTML views of the record list and
//! CRUD forms, plus a rendered PNG chart of the productivity series.

pub mod chart;
pub mod routes;
pub mod views;

pub use routes::{build_router, AppState};
