//! Template view-models. Values are pre-formatted so the templates stay
//! presentation-only.

use askama::Template;
use studylog_core::{ProductivityRecord, TIMESTAMP_FORMAT};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub rows: Vec<RecordRow>,
}

/// One table row of the record list.
pub struct RecordRow {
    pub id: i64,
    pub timestamp: String,
    pub distracted_minutes: String,
    pub studied_minutes: String,
    pub productivity: String,
}

impl From<ProductivityRecord> for RecordRow {
    fn from(record: ProductivityRecord) -> Self {
        Self {
            id: record.id,
            timestamp: record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            distracted_minutes: format_minutes(record.distracted_minutes),
            studied_minutes: format_minutes(record.studied_minutes),
            productivity: format!("{:.4}", record.productivity),
        }
    }
}

#[derive(Template)]
#[template(path = "add.html")]
pub struct AddTemplate;

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditTemplate {
    pub id: i64,
    pub date_time: String,
    pub distracted_minutes: String,
    pub studied_minutes: String,
}

impl From<ProductivityRecord> for EditTemplate {
    fn from(record: ProductivityRecord) -> Self {
        Self {
            id: record.id,
            date_time: record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            distracted_minutes: format_minutes(record.distracted_minutes),
            studied_minutes: format_minutes(record.studied_minutes),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub message: String,
}

/// Render minutes without a trailing ".0" for whole values.
fn format_minutes(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
