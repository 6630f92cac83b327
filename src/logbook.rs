// SPDX-License-Identifier: GPL-3.0-or-later

//! SQLite-backed logbooks.
//!
//! A logbook is a single SQLite file. Each log in it is a table named after the log, with one
//! text column per record field.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Result, bail, ensure};
use regex::Regex;
use sqlx::{
    Row, Sqlite, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
};

use crate::record::{FIELDS, Record};

static LOG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("log name regex is valid"));

/// Checks that `name` can be used as a log (table) name.
pub fn validate_log_name(name: &str) -> Result<()> {
    ensure!(!name.is_empty(), "Log name cannot be empty");
    ensure!(
        LOG_NAME.is_match(name),
        "Log name may only contain letters, digits and underscores, and cannot start with a digit"
    );
    ensure!(
        !name.to_ascii_lowercase().starts_with("sqlite_"),
        "Log names starting with 'sqlite_' are reserved"
    );
    Ok(())
}

/// Quotes a validated log name for use as an SQL identifier.
fn table(name: &str) -> Result<String> {
    validate_log_name(name)?;
    Ok(format!("\"{name}\""))
}

fn record_from_row(row: &SqliteRow) -> Result<Record> {
    let mut record = Record::new();
    record.id = Some(row.try_get("id")?);
    for field in FIELDS {
        let value: Option<String> = row.try_get(*field)?;
        if let Some(value) = value {
            record.set(field, value);
        }
    }
    Ok(record)
}

#[derive(Debug, Clone)]
pub struct Logbook {
    pool: SqlitePool,
    path: PathBuf,
}

impl Logbook {
    /// Opens the logbook at `path`, creating an empty one if it doesn't exist.
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open logbook {}", path.display()))?;
        let logbook = Self {
            pool,
            path: path.to_path_buf(),
        };
        // Fails early on files that aren't SQLite databases
        logbook
            .log_names()
            .await
            .with_context(|| format!("{} is not a valid logbook", path.display()))?;
        log::info!("Opened logbook {}", path.display());
        Ok(logbook)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn close(self) {
        self.pool.close().await;
        log::info!("Closed logbook {}", self.path.display());
    }

    /// Names of all logs in this logbook, sorted.
    pub async fn log_names(&self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<Sqlite, String>(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND substr(lower(name), 1, 7) <> 'sqlite_' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list logs")?;
        Ok(names)
    }

    pub async fn new_log(&self, name: &str) -> Result<()> {
        let table = table(name)?;
        if self.log_names().await?.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            bail!("A log named '{name}' already exists");
        }
        let columns = FIELDS
            .iter()
            .map(|f| format!("{f} TEXT"))
            .collect::<Vec<_>>()
            .join(", ");
        sqlx::query(&format!(
            "CREATE TABLE {table} (id INTEGER PRIMARY KEY AUTOINCREMENT, {columns})"
        ))
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to create log '{name}'"))?;
        log::info!("Created log '{name}'");
        Ok(())
    }

    pub async fn rename_log(&self, old: &str, new: &str) -> Result<()> {
        let old_table = table(old)?;
        let new_table = table(new)?;
        let names = self.log_names().await?;
        ensure!(names.iter().any(|n| n == old), "No log named '{old}'");
        if names.iter().any(|n| n.eq_ignore_ascii_case(new)) {
            bail!("A log named '{new}' already exists");
        }
        sqlx::query(&format!("ALTER TABLE {old_table} RENAME TO {new_table}"))
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to rename log '{old}' to '{new}'"))?;
        log::info!("Renamed log '{old}' to '{new}'");
        Ok(())
    }

    pub async fn delete_log(&self, name: &str) -> Result<()> {
        let table = table(name)?;
        sqlx::query(&format!("DROP TABLE {table}"))
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete log '{name}'"))?;
        log::info!("Deleted log '{name}'");
        Ok(())
    }

    /// All records of a log, in insertion order.
    pub async fn records(&self, log: &str) -> Result<Vec<Record>> {
        let table = table(log)?;
        let rows = sqlx::query(&format!("SELECT * FROM {table} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to read log '{log}'"))?;
        rows.iter().map(record_from_row).collect()
    }

    /// Adds a record and returns its new id. The record's own id is ignored.
    pub async fn add_record(&self, log: &str, record: &Record) -> Result<i64> {
        Ok(self.add_records(log, std::slice::from_ref(record)).await?[0])
    }

    /// Adds records in a single transaction and returns their ids.
    pub async fn add_records(&self, log: &str, records: &[Record]) -> Result<Vec<i64>> {
        let table = table(log)?;
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            let (columns, values): (Vec<_>, Vec<_>) = record.fields().unzip();
            let id = if columns.is_empty() {
                sqlx::query(&format!("INSERT INTO {table} DEFAULT VALUES"))
                    .execute(&mut *tx)
                    .await?
                    .last_insert_rowid()
            } else {
                let sql = format!(
                    "INSERT INTO {table} ({}) VALUES ({})",
                    columns.join(", "),
                    vec!["?"; columns.len()].join(", ")
                );
                let mut query = sqlx::query(&sql);
                for value in values {
                    query = query.bind(value);
                }
                query.execute(&mut *tx).await?.last_insert_rowid()
            };
            ids.push(id);
        }
        tx.commit()
            .await
            .with_context(|| format!("Failed to add records to '{log}'"))?;
        log::debug!("Added {} records to '{log}'", ids.len());
        Ok(ids)
    }

    /// Replaces every field of the stored record with the same id.
    pub async fn update_record(&self, log: &str, record: &Record) -> Result<()> {
        let table = table(log)?;
        let Some(id) = record.id else {
            bail!("Cannot update a record that hasn't been stored");
        };
        let assignments = FIELDS
            .iter()
            .map(|f| format!("{f} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {table} SET {assignments} WHERE id = ?");
        let mut query = sqlx::query(&sql);
        for field in FIELDS {
            let value = record.get(field);
            query = query.bind((!value.is_empty()).then_some(value));
        }
        let result = query
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to update record {id} in '{log}'"))?;
        ensure!(result.rows_affected() == 1, "No record {id} in '{log}'");
        Ok(())
    }

    pub async fn delete_record(&self, log: &str, id: i64) -> Result<()> {
        let table = table(log)?;
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = ?"))
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete record {id} from '{log}'"))?;
        ensure!(result.rows_affected() == 1, "No record {id} in '{log}'");
        Ok(())
    }

    /// Ids of records that duplicate an earlier record in the same log.
    pub async fn duplicates(&self, log: &str) -> Result<Vec<i64>> {
        let records = self.records(log).await?;
        let mut seen = HashSet::new();
        Ok(records
            .iter()
            .filter(|r| !seen.insert(r.duplicate_key()))
            .filter_map(|r| r.id)
            .collect())
    }

    /// Removes duplicate records, keeping the oldest of each, and returns how many were removed.
    pub async fn remove_duplicates(&self, log: &str) -> Result<usize> {
        let table = table(log)?;
        let duplicates = self.duplicates(log).await?;
        let mut tx = self.pool.begin().await?;
        for &id in &duplicates {
            sqlx::query(&format!("DELETE FROM {table} WHERE id = ?"))
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit()
            .await
            .with_context(|| format!("Failed to remove duplicates from '{log}'"))?;
        log::info!("Removed {} duplicates from '{log}'", duplicates.len());
        Ok(duplicates.len())
    }
}
