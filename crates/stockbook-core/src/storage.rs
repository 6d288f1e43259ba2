use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        RwLock,
    },
};

use crate::CoreError;

pub const PRODUCTS_TABLE: &str = "Products";
pub const TRANSACTIONS_TABLE: &str = "Transactions";
pub const REPORTS_TABLE: &str = "Reports";

/// One row of a named table, keyed by header name. Field order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the field value, or an empty string when the column is absent.
    pub fn get(&self, name: &str) -> &str {
        self.field(name).unwrap_or("")
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.set(key, value);
        }
        record
    }
}

/// Header row plus positional value rows, the layout shared by the concrete stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Decodes every row into a header-keyed record. Short rows are padded with blanks
    /// and cells beyond the header row are dropped.
    pub fn records(&self) -> Vec<Record> {
        let headers: Vec<String> = self.headers.iter().map(|h| h.trim().to_string()).collect();
        self.rows
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .enumerate()
                    .map(|(idx, header)| {
                        let value = row.get(idx).cloned().unwrap_or_default();
                        (header.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }

    /// Appends a record, extending the header row with any field it does not know yet.
    pub fn push(&mut self, record: &Record) {
        for (name, _) in record.fields() {
            if !self.headers.iter().any(|header| header.trim() == name) {
                self.headers.push(name.to_string());
            }
        }
        let row = self
            .headers
            .iter()
            .map(|header| record.get(header.trim()).to_string())
            .collect();
        self.rows.push(row);
    }

    /// Replaces all value rows while keeping the existing header order.
    pub fn replace_rows(&mut self, records: &[Record]) {
        self.rows.clear();
        for record in records {
            self.push(record);
        }
    }
}

/// Abstraction over the tabular backend holding products, ledger and reports.
pub trait TabularStore: Send + Sync {
    /// Returns every row of `table` in storage order. Unknown tables read as empty.
    fn read_all(&self, table: &str) -> Result<Vec<Record>, CoreError>;

    /// Appends one row to `table`, creating the table on first write.
    fn append(&self, table: &str, record: Record) -> Result<(), CoreError>;

    /// Rewrites the rows of `table`. Used for catalog maintenance only; the ledger is
    /// append-only.
    fn replace_all(&self, table: &str, records: Vec<Record>) -> Result<(), CoreError>;
}

/// In-process store used by tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<BTreeMap<String, Table>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with [`CoreError::StoreUnavailable`] until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Seeds a table with raw positional rows, as an external editor would leave them.
    pub fn insert_raw(&self, table: &str, headers: &[&str], rows: Vec<Vec<String>>) {
        if let Ok(mut tables) = self.tables.write() {
            tables.insert(
                table.to_string(),
                Table {
                    headers: headers.iter().map(|h| h.to_string()).collect(),
                    rows,
                },
            );
        }
    }

    pub fn table(&self, table: &str) -> Option<Table> {
        self.tables
            .read()
            .ok()
            .and_then(|tables| tables.get(table).cloned())
    }

    fn check_available(&self) -> Result<(), CoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CoreError::StoreUnavailable(
                "memory store marked unavailable".into(),
            ));
        }
        Ok(())
    }
}

impl TabularStore for MemoryStore {
    fn read_all(&self, table: &str) -> Result<Vec<Record>, CoreError> {
        self.check_available()?;
        let tables = self
            .tables
            .read()
            .map_err(|_| CoreError::StoreUnavailable("memory store lock poisoned".into()))?;
        Ok(tables.get(table).map(Table::records).unwrap_or_default())
    }

    fn append(&self, table: &str, record: Record) -> Result<(), CoreError> {
        self.check_available()?;
        let mut tables = self
            .tables
            .write()
            .map_err(|_| CoreError::StoreUnavailable("memory store lock poisoned".into()))?;
        tables.entry(table.to_string()).or_default().push(&record);
        Ok(())
    }

    fn replace_all(&self, table: &str, records: Vec<Record>) -> Result<(), CoreError> {
        self.check_available()?;
        let mut tables = self
            .tables
            .write()
            .map_err(|_| CoreError::StoreUnavailable("memory store lock poisoned".into()))?;
        tables
            .entry(table.to_string())
            .or_default()
            .replace_rows(&records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_rows_are_padded_with_blanks() {
        let store = MemoryStore::new();
        store.insert_raw(
            TRANSACTIONS_TABLE,
            &["Type", " Product ID ", "Quantity"],
            vec![vec!["in".into()]],
        );
        let rows = store.read_all(TRANSACTIONS_TABLE).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Type"), "in");
        assert_eq!(rows[0].field("Product ID"), Some(""));
        assert_eq!(rows[0].get("Missing"), "");
    }

    #[test]
    fn append_extends_headers_for_new_fields() {
        let store = MemoryStore::new();
        store
            .append("T", Record::new().with("A", "1").with("B", "2"))
            .unwrap();
        store
            .append("T", Record::new().with("B", "3").with("C", "4"))
            .unwrap();
        let table = store.table("T").unwrap();
        assert_eq!(table.headers, vec!["A", "B", "C"]);
        assert_eq!(table.rows[1], vec!["", "3", "4"]);
    }

    #[test]
    fn unknown_table_reads_empty() {
        let store = MemoryStore::new();
        assert!(store.read_all("Nope").unwrap().is_empty());
    }

    #[test]
    fn unavailable_store_reports_error() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let err = store.read_all(PRODUCTS_TABLE).unwrap_err();
        assert!(err.is_store_unavailable());
    }
}
