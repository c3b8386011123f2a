use std::collections::HashSet;

use tracing::debug;

use crate::clean::{clean_colors, clean_gender, clean_price, clean_rating, clean_size};
use crate::error::{TransformError, ValidateError};
use crate::records::{CleanProduct, RawProduct, UNKNOWN_PRODUCT};
use crate::table::{Cell, Dataset, COLUMNS};

/// Clean a raw batch into the fixed-column dataset.
///
/// A record is dropped wholesale when it carries the placeholder title, when
/// any cleaner resolves its field to missing, or when it duplicates an
/// earlier row (full equality, timestamp included).
pub fn transform(records: &[RawProduct], rate: f64) -> Result<Dataset, TransformError> {
    if records.is_empty() {
        return Err(TransformError::EmptyBatch);
    }

    let mut products: Vec<CleanProduct> = Vec::with_capacity(records.len());
    let mut seen: HashSet<String> = HashSet::new();
    let mut unknown = 0usize;
    let mut incomplete = 0usize;
    let mut duplicate = 0usize;

    for record in records {
        if record.title == UNKNOWN_PRODUCT {
            unknown += 1;
            continue;
        }

        let cleaned = (
            clean_price(record.price.as_deref(), rate),
            clean_rating(record.rating.as_deref()),
            clean_colors(record.colors.as_deref()),
            clean_size(record.size.as_deref()),
            clean_gender(record.gender.as_deref()),
        );
        let (Some(price), Some(rating), Some(colors), Some(size), Some(gender)) = cleaned else {
            incomplete += 1;
            continue;
        };

        let product = CleanProduct {
            title: record.title.clone(),
            price,
            rating,
            colors,
            size,
            gender,
            collected_at: record.collected_at.clone(),
        };
        if !seen.insert(row_key(&product)) {
            duplicate += 1;
            continue;
        }
        products.push(product);
    }

    debug!(
        "transform: {} in, {} unknown, {} incomplete, {} duplicate, {} out",
        records.len(),
        unknown,
        incomplete,
        duplicate,
        products.len()
    );

    Ok(Dataset::from_products(products))
}

fn row_key(p: &CleanProduct) -> String {
    format!(
        "{}\x1f{}\x1f{}\x1f{}\x1f{}\x1f{}\x1f{}",
        p.title, p.price, p.rating, p.colors, p.size, p.gender, p.collected_at
    )
}

/// Read-only gate over the transformed dataset. Checks run in order:
/// emptiness, schema, nulls, duplicates, placeholder titles, cell types.
pub fn validate(dataset: &Dataset) -> Result<(), ValidateError> {
    if dataset.is_empty() {
        return Err(ValidateError::Empty);
    }

    let missing: Vec<String> = COLUMNS
        .iter()
        .filter(|c| dataset.column_index(c).is_none())
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidateError::MissingColumns(missing));
    }

    for (row_idx, row) in dataset.rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            if matches!(cell, Cell::Null) {
                return Err(ValidateError::NullValue {
                    column: dataset.columns[col_idx].clone(),
                    row: row_idx,
                });
            }
        }
    }

    let mut seen = HashSet::new();
    for row in &dataset.rows {
        let key = row
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("\x1f");
        if !seen.insert(key) {
            return Err(ValidateError::DuplicateRows);
        }
    }

    // Column presence is established above; index lookups cannot fail here.
    let col = |name: &str| dataset.column_index(name).unwrap();

    let title_col = col("title");
    for row in &dataset.rows {
        if matches!(&row[title_col], Cell::Text(t) if t == UNKNOWN_PRODUCT) {
            return Err(ValidateError::UnknownProduct);
        }
    }

    for (name, expected) in [
        ("title", "text"),
        ("price", "float"),
        ("rating", "float"),
        ("colors", "int"),
        ("size", "text"),
        ("gender", "text"),
        ("collected_at", "text"),
    ] {
        let idx = col(name);
        let ok = dataset.rows.iter().all(|row| {
            matches!(
                (&row[idx], expected),
                (Cell::Text(_), "text") | (Cell::Float(_), "float") | (Cell::Int(_), "int")
            )
        });
        if !ok {
            return Err(ValidateError::WrongType {
                column: name.to_string(),
                expected,
            });
        }
    }

    Ok(())
}

// ── Tests ──
