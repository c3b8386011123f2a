/// Title the catalog renders on cards it failed to populate. Rows carrying
/// it are unusable regardless of their other fields.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// One product card as scraped, text kept verbatim. Only the title is
/// guaranteed; everything else may be absent from the markup.
#[derive(Debug, Clone)]
pub struct RawProduct {
    pub title: String,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub colors: Option<String>,
    pub size: Option<String>,
    pub gender: Option<String>,
    /// Batch timestamp, identical for every record of one run.
    pub collected_at: String,
}

/// Fully cleaned record. All fields present and typed.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanProduct {
    pub title: String,
    pub price: f64,
    pub rating: f64,
    pub colors: i64,
    pub size: String,
    pub gender: String,
    pub collected_at: String,
}
