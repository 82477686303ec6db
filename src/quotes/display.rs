//! Filter and display engine
//!
//! Random selection restricted by the category filter, and the projection of
//! a selection onto whatever surface shows it.

use rand::Rng;

use crate::quotes::{CategoryFilter, QuoteStore};
use crate::types::Quote;

/// Result of a filtered random pick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    Quote(Quote),
    /// No quote matches the filter
    Empty(CategoryFilter),
}

/// Display-ready representation of a pick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteCard {
    pub body: String,
    pub caption: Option<String>,
    pub is_empty: bool,
}

/// Rendering capabilities the quote book needs from a UI
///
/// The core never touches presentation directly; it only calls these.
pub trait RenderSurface {
    fn render_quote(&mut self, card: QuoteCard);
    fn render_empty(&mut self, card: QuoteCard);
    fn populate_category_options(&mut self, options: Vec<String>, selected: String);
    fn show_status(&mut self, message: String);
}

/// Uniformly pick one quote among those matching `filter`
pub fn pick_quote<R: Rng>(store: &QuoteStore, filter: &CategoryFilter, rng: &mut R) -> Pick {
    let candidates: Vec<&Quote> = store
        .quotes()
        .iter()
        .filter(|q| filter.matches(&q.category))
        .collect();

    if candidates.is_empty() {
        return Pick::Empty(filter.clone());
    }

    let index = rng.random_range(0..candidates.len());
    Pick::Quote(candidates[index].clone())
}

/// Project a pick to its display form
pub fn render(pick: &Pick) -> QuoteCard {
    match pick {
        Pick::Quote(quote) => QuoteCard {
            body: format!("\u{201c}{}\u{201d}", quote.text),
            caption: Some(format!("Category: {}", quote.category)),
            is_empty: false,
        },
        Pick::Empty(_) => QuoteCard {
            body: "No quotes available in this category.".to_string(),
            caption: None,
            is_empty: true,
        },
    }
}

/// Send a pick to the surface
pub fn present(pick: &Pick, surface: &mut dyn RenderSurface) {
    let card = render(pick);
    match pick {
        Pick::Quote(_) => surface.render_quote(card),
        Pick::Empty(_) => surface.render_empty(card),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store() -> QuoteStore {
        QuoteStore::new(vec![
            Quote::new("a", "Life"),
            Quote::new("b", "Tech"),
            Quote::new("c", "Life"),
            Quote::new("d", "Motivation"),
        ])
    }

    #[test]
    fn test_filtered_pick_only_returns_matching_category() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(7);

        for category in ["Life", "Tech", "Motivation"] {
            let filter = CategoryFilter::Only(category.to_string());
            for _ in 0..50 {
                match pick_quote(&store, &filter, &mut rng) {
                    Pick::Quote(quote) => assert_eq!(quote.category, category),
                    Pick::Empty(_) => panic!("category {category} has quotes"),
                }
            }
        }
    }

    #[test]
    fn test_unfiltered_pick_covers_whole_store() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            if let Pick::Quote(quote) = pick_quote(&store, &CategoryFilter::All, &mut rng) {
                assert!(store.quotes().contains(&quote));
                seen.insert(quote.text);
            }
        }
        assert_eq!(seen.len(), store.len());
    }

    #[test]
    fn test_empty_category_yields_empty_state() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(1);
        let filter = CategoryFilter::Only("Poetry".to_string());

        assert_eq!(pick_quote(&store, &filter, &mut rng), Pick::Empty(filter.clone()));
        assert!(render(&Pick::Empty(filter)).is_empty);
    }

    #[test]
    fn test_render_quote_card() {
        let card = render(&Pick::Quote(Quote::new("Hi", "Tech")));
        assert_eq!(card.body, "\u{201c}Hi\u{201d}");
        assert_eq!(card.caption.as_deref(), Some("Category: Tech"));
        assert!(!card.is_empty);
    }
}
