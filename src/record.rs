// Record shapes read out of the Clear database

use rusqlite::Row;

/// A row shape that can be decoded from a table and flattened into a CSV record
pub trait Record: Sized {
    /// Short name for log lines (e.g., "task", "list")
    const KIND: &'static str;

    /// Column names this shape decodes, in the order `fields` emits them
    const COLUMNS: &'static [&'static str];

    /// Decode one row, reading every field by its name in `COLUMNS`
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Flatten into text fields, one per entry in `COLUMNS`
    fn fields(&self) -> Vec<String>;
}

/// Maps the columns of a live table onto a record's declared columns
///
/// `order[i]` is the index into the declared columns that fills output position `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    order: Vec<usize>,
}

/// Columns on either side that have no counterpart on the other
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMismatch {
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

impl ColumnMapping {
    /// Emit fields in declared order
    pub fn identity(declared: &[&str]) -> Self {
        Self {
            order: (0..declared.len()).collect(),
        }
    }

    /// Build a mapping that emits fields in `live` order
    ///
    /// The two column sets must be equal; order may differ.
    pub fn resolve(declared: &[&str], live: &[String]) -> Result<Self, ColumnMismatch> {
        let missing: Vec<String> = declared
            .iter()
            .filter(|name| !live.iter().any(|l| l == *name))
            .map(|name| name.to_string())
            .collect();

        let mut unexpected = Vec::new();
        let mut order = Vec::with_capacity(live.len());
        for name in live {
            match declared.iter().position(|d| d == name) {
                Some(idx) if !order.contains(&idx) => order.push(idx),
                _ => unexpected.push(name.clone()),
            }
        }

        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(ColumnMismatch { missing, unexpected });
        }

        Ok(Self { order })
    }

    /// Number of fields in each projected record
    pub fn width(&self) -> usize {
        self.order.len()
    }

    /// Reorder a record's flattened fields into output order
    pub fn project(&self, mut fields: Vec<String>) -> Vec<String> {
        self.order
            .iter()
            .map(|&idx| fields.get_mut(idx).map(std::mem::take).unwrap_or_default())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECLARED: &[&str] = &["id", "identifier", "title"];

    fn live(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identity_keeps_declared_order() {
        let mapping = ColumnMapping::identity(DECLARED);
        assert_eq!(mapping.width(), 3);
        let fields = vec!["1".to_string(), "abc".to_string(), "Groceries".to_string()];
        assert_eq!(mapping.project(fields.clone()), fields);
    }

    #[test]
    fn test_resolve_follows_live_order() {
        let mapping = ColumnMapping::resolve(DECLARED, &live(&["title", "id", "identifier"])).unwrap();
        let projected = mapping.project(vec!["1".to_string(), "abc".to_string(), "Groceries".to_string()]);
        assert_eq!(projected, vec!["Groceries", "1", "abc"]);
    }

    #[test]
    fn test_resolve_reports_missing_and_unexpected() {
        let err = ColumnMapping::resolve(DECLARED, &live(&["id", "identifier", "list_identifier"])).unwrap_err();
        assert_eq!(err.missing, vec!["title"]);
        assert_eq!(err.unexpected, vec!["list_identifier"]);
    }

    #[test]
    fn test_resolve_rejects_duplicate_live_column() {
        let err = ColumnMapping::resolve(DECLARED, &live(&["id", "identifier", "title", "id"])).unwrap_err();
        assert!(err.missing.is_empty());
        assert_eq!(err.unexpected, vec!["id"]);
    }

    #[test]
    fn test_resolve_rejects_extra_column() {
        let err = ColumnMapping::resolve(DECLARED, &live(&["id", "identifier", "title", "scroll"])).unwrap_err();
        assert_eq!(err.unexpected, vec!["scroll"]);
    }
}
