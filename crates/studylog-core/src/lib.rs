//! # studylog Core Library
//!
//! Core business logic for studylog, a personal productivity log. The user
//! records time intervals spent distracted versus studying; each record
//! carries a derived productivity score `e^(-distracted/studied)` computed
//! at write time.
//!
//! ## Key Components
//!
//! - [`productivity_score`]: the pure score calculator
//! - [`RecordDraft`]: validated create/update input
//! - [`RecordService`]: validation + scoring + scoped SQLite access
//! - [`Database`]: the SQLite record store
//! - [`Config`]: TOML application configuration

pub mod error;
pub mod record;
pub mod score;
pub mod service;
pub mod storage;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use record::{parse_timestamp, ProductivityRecord, RecordDraft, TIMESTAMP_FORMAT};
pub use score::productivity_score;
pub use service::RecordService;
pub use storage::{Config, Database};
