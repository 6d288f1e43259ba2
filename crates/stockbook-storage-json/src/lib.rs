use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{Deserialize, Serialize};
use stockbook_core::{CoreError, Record, Table, TabularStore};
use tracing::debug;

const TABLE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// On-disk layout of one table: the header row followed by positional value rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TableFile {
    headers: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

impl From<TableFile> for Table {
    fn from(file: TableFile) -> Self {
        Table {
            headers: file.headers,
            rows: file.rows,
        }
    }
}

impl From<Table> for TableFile {
    fn from(table: Table) -> Self {
        TableFile {
            headers: table.headers,
            rows: table.rows,
        }
    }
}

/// Filesystem-backed tabular store. Each table lives in `<root>/<slug>.json`.
#[derive(Debug)]
pub struct JsonTableStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonTableStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table_path(&self, table: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(table), TABLE_EXTENSION))
    }

    /// Loads the raw table. A table that was never written is empty.
    pub fn load_table(&self, table: &str) -> Result<Table, CoreError> {
        let path = self.table_path(table);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Table::default()),
            Err(err) => return Err(err.into()),
        };
        let file: TableFile = serde_json::from_str(&data).map_err(|err| {
            CoreError::StoreUnavailable(format!("table `{table}` is unreadable: {err}"))
        })?;
        Ok(file.into())
    }

    fn save_table(&self, table: &str, contents: Table) -> Result<(), CoreError> {
        let path = self.table_path(table);
        let data = serialize_table(table, contents.into())?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn modify<F>(&self, table: &str, change: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Table),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| CoreError::StoreUnavailable("table store lock poisoned".into()))?;
        let mut contents = self.load_table(table)?;
        change(&mut contents);
        self.save_table(table, contents)
    }
}

impl TabularStore for JsonTableStore {
    fn read_all(&self, table: &str) -> Result<Vec<Record>, CoreError> {
        let records = self.load_table(table)?.records();
        debug!(table, rows = records.len(), "table read");
        Ok(records)
    }

    fn append(&self, table: &str, record: Record) -> Result<(), CoreError> {
        self.modify(table, |contents| contents.push(&record))?;
        debug!(table, "row appended");
        Ok(())
    }

    fn replace_all(&self, table: &str, records: Vec<Record>) -> Result<(), CoreError> {
        let count = records.len();
        self.modify(table, |contents| contents.replace_rows(&records))?;
        debug!(table, rows = count, "table rewritten");
        Ok(())
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "table".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

fn serialize_table(table: &str, file: TableFile) -> Result<String, CoreError> {
    serde_json::to_string_pretty(&file).map_err(|err| {
        CoreError::StoreUnavailable(format!("table `{table}` could not be encoded: {err}"))
    })
}
