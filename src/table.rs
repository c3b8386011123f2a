use std::fmt;

use crate::records::CleanProduct;

/// Fixed column set and order of the output dataset.
pub const COLUMNS: [&str; 7] = [
    "title",
    "price",
    "rating",
    "colors",
    "size",
    "gender",
    "collected_at",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Float(f64),
    Int(i64),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Null => Ok(()),
        }
    }
}

/// In-memory rectangular table: named columns plus rows of cells. This is
/// the shape handed to the load adapters.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Dataset {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build the fixed-column dataset from cleaned records.
    pub fn from_products(products: Vec<CleanProduct>) -> Self {
        let mut dataset = Dataset::new(COLUMNS.iter().map(|c| c.to_string()).collect());
        for p in products {
            dataset.rows.push(vec![
                Cell::Text(p.title),
                Cell::Float(p.price),
                Cell::Float(p.rating),
                Cell::Int(p.colors),
                Cell::Text(p.size),
                Cell::Text(p.gender),
                Cell::Text(p.collected_at),
            ]);
        }
        dataset
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> CleanProduct {
        CleanProduct {
            title: "T-shirt 2".into(),
            price: 1_634_400.0,
            rating: 3.9,
            colors: 3,
            size: "M".into(),
            gender: "Women".into(),
            collected_at: "2025-01-02 10:00:00".into(),
        }
    }

    #[test]
    fn columns_in_fixed_order() {
        let ds = Dataset::from_products(vec![product()]);
        assert_eq!(ds.columns, COLUMNS);
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn cells_typed_per_column() {
        let ds = Dataset::from_products(vec![product()]);
        let row = &ds.rows[0];
        assert!(matches!(&row[0], Cell::Text(t) if t == "T-shirt 2"));
        assert!(matches!(row[1], Cell::Float(_)));
        assert!(matches!(row[2], Cell::Float(_)));
        assert!(matches!(row[3], Cell::Int(3)));
    }

    #[test]
    fn cell_display() {
        assert_eq!(Cell::Text("M".into()).to_string(), "M");
        assert_eq!(Cell::Int(3).to_string(), "3");
        assert_eq!(Cell::Float(3.9).to_string(), "3.9");
        assert_eq!(Cell::Null.to_string(), "");
    }
}
