use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use rusqlite::Connection;
use tracing::info;

use crate::table::{Cell, Dataset};

/// Write the dataset to a CSV file, header row first.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<PathBuf> {
    ensure!(!dataset.is_empty(), "refusing to write an empty dataset");

    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(&dataset.columns)?;
    for row in &dataset.rows {
        writer.write_record(row.iter().map(|c| c.to_string()))?;
    }
    writer.flush()?;

    info!("wrote {} rows to {}", dataset.len(), path.display());
    Ok(path.to_path_buf())
}

/// Replace `table` in the SQLite database with the dataset rows. Returns
/// the number of rows written.
pub fn write_sqlite(dataset: &Dataset, db_path: &Path, table: &str) -> Result<usize> {
    ensure!(!dataset.is_empty(), "refusing to write an empty dataset");
    ensure!(
        !table.is_empty() && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
        "invalid table name '{}'",
        table
    );

    let conn = Connection::open(db_path)
        .with_context(|| format!("opening {}", db_path.display()))?;
    conn.execute_batch(&format!(
        "DROP TABLE IF EXISTS {table};
         CREATE TABLE {table} (
            title        TEXT NOT NULL,
            price        REAL NOT NULL,
            rating       REAL NOT NULL,
            colors       INTEGER NOT NULL,
            size         TEXT NOT NULL,
            gender       TEXT NOT NULL,
            collected_at TEXT NOT NULL
         );"
    ))?;

    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {table} VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
        ))?;
        for row in &dataset.rows {
            count += stmt.execute(rusqlite::params_from_iter(row.iter().map(cell_value)))?;
        }
    }
    tx.commit()?;

    info!(
        "wrote {} rows to table '{}' in {}",
        count,
        table,
        db_path.display()
    );
    Ok(count)
}

fn cell_value(cell: &Cell) -> rusqlite::types::Value {
    use rusqlite::types::Value;
    match cell {
        Cell::Text(s) => Value::Text(s.clone()),
        Cell::Float(v) => Value::Real(*v),
        Cell::Int(v) => Value::Integer(*v),
        Cell::Null => Value::Null,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::CleanProduct;

    fn dataset() -> Dataset {
        Dataset::from_products(vec![
            CleanProduct {
                title: "T-shirt 2".into(),
                price: 1_634_400.0,
                rating: 3.9,
                colors: 3,
                size: "M".into(),
                gender: "Women".into(),
                collected_at: "2025-01-02 10:00:00".into(),
            },
            CleanProduct {
                title: "Hoodie 3".into(),
                price: 7_950_080.0,
                rating: 4.8,
                colors: 3,
                size: "L".into(),
                gender: "Unisex".into(),
                collected_at: "2025-01-02 10:00:00".into(),
            },
        ])
    }

    #[test]
    fn csv_header_matches_column_order() {
        let path = std::env::temp_dir().join("fashion_etl_csv_header.csv");
        write_csv(&dataset(), &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let header = contents.lines().next().unwrap();
        assert_eq!(
            header,
            "title,price,rating,colors,size,gender,collected_at"
        );
        assert_eq!(contents.lines().count(), 3);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn csv_rejects_empty_dataset() {
        let path = std::env::temp_dir().join("fashion_etl_csv_empty.csv");
        let empty = Dataset::new(vec!["title".into()]);
        assert!(write_csv(&empty, &path).is_err());
    }

    #[test]
    fn sqlite_row_count_matches_dataset() {
        let path = std::env::temp_dir().join("fashion_etl_load_test.sqlite");
        std::fs::remove_file(&path).ok();

        let written = write_sqlite(&dataset(), &path, "products").unwrap();
        assert_eq!(written, 2);

        let conn = Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM products", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let title: String = conn
            .query_row("SELECT title FROM products ORDER BY title LIMIT 1", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(title, "Hoodie 3");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn sqlite_replaces_existing_table() {
        let path = std::env::temp_dir().join("fashion_etl_replace_test.sqlite");
        std::fs::remove_file(&path).ok();

        write_sqlite(&dataset(), &path, "products").unwrap();
        write_sqlite(&dataset(), &path, "products").unwrap();

        let conn = Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM products", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn sqlite_rejects_hostile_table_name() {
        let path = std::env::temp_dir().join("fashion_etl_badname.sqlite");
        let err = write_sqlite(&dataset(), &path, "products; DROP TABLE x").unwrap_err();
        assert!(err.to_string().contains("invalid table name"));
    }
}
