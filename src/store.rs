use crate::domain::{SECRET_HEADERS, VERSION_HEADERS};

pub type Row = Vec<String>;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordList {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VersionHistory {
    pub headers: Vec<String>,
    pub current: Row,
    pub older: Vec<Row>,
}

/// Read-only access to secrets and their versions.
pub trait RecordStore {
    fn list_records(&self) -> RecordList;

    /// Returns `None` if no record with this name exists.
    fn list_versions(&self, name: &str) -> Option<VersionHistory>;
}

/// Compiled-in sample content. Every record shares the same version history.
#[derive(Debug, Default)]
pub struct SampleStore;

fn row(fields: &[&str]) -> Row {
    fields.iter().map(|s| s.to_string()).collect()
}

fn version_row(version: &str) -> Row {
    row(&[
        version,
        "Enabled",
        "null",
        "null",
        "10/30/2024, 2:48:08 PM",
        "10/30/2024, 2:48:08 PM",
    ])
}

impl RecordStore for SampleStore {
    fn list_records(&self) -> RecordList {
        RecordList {
            headers: row(&SECRET_HEADERS),
            rows: vec![
                row(&["test1", "text", "enabled", "2024-01-02"]),
                row(&["test2", "null", "enabled", "null"]),
                row(&["dev", "null", "enabled", "null"]),
            ],
        }
    }

    fn list_versions(&self, name: &str) -> Option<VersionHistory> {
        let known = self
            .list_records()
            .rows
            .iter()
            .any(|r| r.first().is_some_and(|n| n == name));
        if !known {
            return None;
        }
        Some(VersionHistory {
            headers: row(&VERSION_HEADERS),
            current: version_row("cddcssd"),
            older: vec![
                version_row("xxxxadsx"),
                version_row("sdfdscdsc"),
                version_row("fadcdcsa"),
            ],
        })
    }
}
