// Data models for the Clear database tables

use crate::record::Record;
use rusqlite::Row;

const ID: &str = "id";
const IDENTIFIER: &str = "identifier";
const LIST_IDENTIFIER: &str = "list_identifier";
const TITLE: &str = "title";
const SCROLL: &str = "scroll";
const PREV_IDENTIFIER: &str = "prev_identifier";
const NEXT_IDENTIFIER: &str = "next_identifier";

/// A task as stored in the `tasks` and `completed_tasks` tables
///
/// Tasks within a list form a doubly-linked ordering through their prev/next identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub identifier: String,
    pub list_identifier: String,
    pub title: String,
    pub prev_identifier: Option<String>,
    pub next_identifier: Option<String>,
}

impl Record for Task {
    const KIND: &'static str = "task";

    const COLUMNS: &'static [&'static str] = &[
        ID,
        IDENTIFIER,
        LIST_IDENTIFIER,
        TITLE,
        PREV_IDENTIFIER,
        NEXT_IDENTIFIER,
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(ID)?,
            identifier: row.get(IDENTIFIER)?,
            list_identifier: row.get(LIST_IDENTIFIER)?,
            title: row.get(TITLE)?,
            prev_identifier: row.get(PREV_IDENTIFIER)?,
            next_identifier: row.get(NEXT_IDENTIFIER)?,
        })
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.identifier.clone(),
            self.list_identifier.clone(),
            self.title.clone(),
            self.prev_identifier.clone().unwrap_or_default(),
            self.next_identifier.clone().unwrap_or_default(),
        ]
    }
}

/// A list as stored in the `lists` table
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub id: i64,
    pub identifier: String,
    pub title: String,
    pub scroll: f64,
    pub prev_identifier: Option<String>,
}

impl Record for List {
    const KIND: &'static str = "list";

    const COLUMNS: &'static [&'static str] = &[ID, IDENTIFIER, TITLE, SCROLL, PREV_IDENTIFIER];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(ID)?,
            identifier: row.get(IDENTIFIER)?,
            title: row.get(TITLE)?,
            scroll: row.get(SCROLL)?,
            prev_identifier: row.get(PREV_IDENTIFIER)?,
        })
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.identifier.clone(),
            self.title.clone(),
            // Scroll position is exported as whole points
            (self.scroll.trunc() as i64).to_string(),
            self.prev_identifier.clone().unwrap_or_default(),
        ]
    }
}
