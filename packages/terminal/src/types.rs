//! Values passed to a terminal UI.

use serde::{Deserialize, Serialize};

/// Style hint for an output line.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Normal,
    Header,
    Info,
    Success,
    Warning,
    Error,
}

/// One row of a name/value summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedValue {
    pub name: String,
    pub value: String,
}

impl NamedValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A table with a header row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells are padded; extra cells are kept.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        if row.len() < self.headers.len() {
            row.resize(self.headers.len(), String::new());
        }
        self.rows.push(row);
    }
}

/// A prompt for one line of input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputRequest {
    pub prompt: String,
    /// Hide what the user types.
    #[serde(default)]
    pub secret: bool,
}

impl InputRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            secret: false,
        }
    }

    pub fn secret(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            secret: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_rows_are_padded() {
        let mut table = Table::new(["name", "status"]);
        table.push_row(["web"]);
        assert_eq!(table.rows[0], vec!["web".to_string(), String::new()]);
    }

    #[test]
    fn style_serializes_lowercase() {
        let frame = protomap_wire::encode_frame(&OutputStyle::Warning).unwrap();
        assert_eq!(&frame[..], b"\"warning\"");
    }
}
