use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::error::ExtractError;
use crate::records::RawProduct;

static CARD_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.collection-card").unwrap());
static TITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3.product-title").unwrap());
static PRICE_CONTAINER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.price-container").unwrap());
static PRICE_SPAN_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.price").unwrap());
static PRICE_FLAT_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.price").unwrap());
static PARAGRAPH_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

#[derive(Debug, Clone, Copy)]
enum Field {
    Rating,
    Colors,
    Size,
    Gender,
}

/// Label → field dispatch over detail fragments, evaluated in order.
/// First matching label wins for a fragment.
const DETAIL_LABELS: &[(&str, Field)] = &[
    ("Rating:", Field::Rating),
    ("Colors", Field::Colors),
    ("Size:", Field::Size),
    ("Gender:", Field::Gender),
];

/// Extract every product card from one page of catalog markup.
///
/// A card whose title is missing is logged and skipped; the rest of the
/// page still parses, so the result may be shorter than the card count.
pub fn parse_page(html: &str) -> Result<Vec<RawProduct>, ExtractError> {
    if html.trim().is_empty() {
        return Err(ExtractError::InvalidContent);
    }

    let document = Html::parse_document(html);
    let cards: Vec<ElementRef> = document.select(&CARD_SEL).collect();
    if cards.is_empty() {
        return Err(ExtractError::NoRecordsFound);
    }

    let mut products = Vec::with_capacity(cards.len());
    for card in cards {
        match parse_card(card) {
            Ok(product) => products.push(product),
            Err(e) => warn!("skipping card: {}", e),
        }
    }
    Ok(products)
}

fn parse_card(card: ElementRef) -> Result<RawProduct, ExtractError> {
    let title = card
        .select(&TITLE_SEL)
        .next()
        .map(element_text)
        .ok_or(ExtractError::MissingTitle)?;

    // Regular cards nest the price in a container span; the
    // "Price Unavailable" variant is a flat <p class="price"> instead.
    let price = match card.select(&PRICE_CONTAINER_SEL).next() {
        Some(container) => container.select(&PRICE_SPAN_SEL).next().map(element_text),
        None => card.select(&PRICE_FLAT_SEL).next().map(element_text),
    };

    // Detail lines all share the same muted inline style (color #777).
    let fragments: Vec<String> = card
        .select(&PARAGRAPH_SEL)
        .filter(|el| el.value().attr("style").is_some_and(|s| s.contains("777")))
        .map(element_text)
        .collect();

    let mut rating = None;
    let mut colors = None;
    let mut size = None;
    let mut gender = None;
    for text in &fragments {
        let Some(field) = classify_fragment(text) else {
            continue;
        };
        let slot = match field {
            Field::Rating => &mut rating,
            Field::Colors => &mut colors,
            Field::Size => &mut size,
            Field::Gender => &mut gender,
        };
        if slot.is_none() {
            *slot = Some(text.clone());
        }
    }

    // Unrated cards style the rating line without the exact "Rating:" label;
    // a looser second scan picks up the first such fragment in document order.
    if rating.is_none() {
        rating = fragments
            .iter()
            .find(|t| t.contains("Rated") || t.contains("Rating"))
            .cloned();
    }

    Ok(RawProduct {
        title,
        price,
        rating,
        colors,
        size,
        gender,
        collected_at: String::new(),
    })
}

fn classify_fragment(text: &str) -> Option<Field> {
    DETAIL_LABELS
        .iter()
        .find(|(label, _)| text.contains(label))
        .map(|(_, field)| *field)
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

// ── Tests ──
