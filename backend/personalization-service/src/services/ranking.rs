//! Catalog re-ranking from behavior signals.
//!
//! A pure function of (catalog, context): no hidden state, deterministic for
//! identical inputs, and stable so tied scores keep the catalog order.

use crate::domain::{CatalogBook, PersonalizationContext};
use crate::services::affinity;

const FAVORITE_GENRE_BOOST: i32 = 5;
const RECENT_AUTHOR_BOOST: i32 = 3;
const ALREADY_VIEWED_PENALTY: i32 = -2;

/// Score one book against the user's signals.
fn score(book: &CatalogBook, ctx: &PersonalizationContext, favorites: &[String]) -> i32 {
    let mut score = 0;

    if let Some(genre) = &book.genre {
        if favorites.iter().any(|g| g == genre) {
            score += FAVORITE_GENRE_BOOST;
        }
    }

    if ctx
        .profile
        .recently_viewed_authors
        .iter()
        .any(|a| *a == book.author)
    {
        score += RECENT_AUTHOR_BOOST;
    }

    if ctx.profile.recently_viewed_books.contains(&book.id) {
        score += ALREADY_VIEWED_PENALTY;
    }

    score
}

/// Reorder a catalog so books matching the user's affinities come first.
///
/// Identity when the user has not consented, when the catalog is empty, or
/// on cold start (no genre signal recorded yet) — reordering on no signal
/// would just shuffle meaninglessly.
pub fn rank(catalog: Vec<CatalogBook>, ctx: &PersonalizationContext) -> Vec<CatalogBook> {
    if !ctx.consented || catalog.is_empty() || ctx.profile.is_cold() {
        return catalog;
    }

    let favorites = affinity::favorite_genres(ctx);

    let mut scored: Vec<(i32, CatalogBook)> = catalog
        .into_iter()
        .map(|book| (score(&book, ctx, &favorites), book))
        .collect();

    // Stable sort keeps catalog order for ties
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, book)| book).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BehaviorProfile, GenreCount, UserPreferences};
    use uuid::Uuid;

    fn book(n: u128, title: &str, author: &str, genre: Option<&str>) -> CatalogBook {
        CatalogBook {
            id: Uuid::from_u128(n),
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.map(str::to_string),
            cover_image: None,
            publication_date: None,
            isbn: None,
        }
    }

    fn consented(profile: BehaviorProfile) -> PersonalizationContext {
        PersonalizationContext {
            consented: true,
            profile,
            preferences: UserPreferences::default(),
        }
    }

    fn fiction_fan() -> PersonalizationContext {
        let mut profile = BehaviorProfile::default();
        profile.interactions_by_genre = vec![GenreCount {
            genre: "Fiction".to_string(),
            count: 5,
        }];
        consented(profile)
    }

    #[test]
    fn no_consent_is_identity() {
        let catalog = vec![
            book(1, "A", "Ann", Some("Sci-Fi")),
            book(2, "B", "Bob", Some("Fiction")),
        ];
        let ranked = rank(catalog.clone(), &PersonalizationContext::without_consent());
        assert_eq!(ranked, catalog);
    }

    #[test]
    fn cold_start_is_identity() {
        let catalog = vec![
            book(1, "A", "Ann", Some("Sci-Fi")),
            book(2, "B", "Bob", Some("Fiction")),
        ];
        let ranked = rank(catalog.clone(), &consented(BehaviorProfile::default()));
        assert_eq!(ranked, catalog);
    }

    #[test]
    fn empty_catalog_is_identity() {
        assert!(rank(Vec::new(), &fiction_fan()).is_empty());
    }

    #[test]
    fn favorite_genre_ranks_first() {
        let catalog = vec![
            book(1, "A", "Ann", Some("Sci-Fi")),
            book(2, "B", "Bob", Some("Fiction")),
        ];

        let ranked = rank(catalog, &fiction_fan());
        assert_eq!(ranked[0].title, "B");
        assert_eq!(ranked[1].title, "A");
    }

    #[test]
    fn recently_viewed_author_outranks_neutral() {
        let mut ctx = fiction_fan();
        ctx.profile.recently_viewed_authors = vec!["Carol".to_string()];

        let catalog = vec![
            book(1, "A", "Ann", None),
            book(2, "C", "Carol", None),
        ];

        let ranked = rank(catalog, &ctx);
        assert_eq!(ranked[0].author, "Carol");
    }

    #[test]
    fn already_viewed_books_sink() {
        let mut ctx = fiction_fan();
        ctx.profile.recently_viewed_books = vec![Uuid::from_u128(2)];

        let catalog = vec![
            book(2, "Seen", "Ann", None),
            book(3, "Fresh", "Bob", None),
        ];

        let ranked = rank(catalog, &ctx);
        assert_eq!(ranked[0].title, "Fresh");
        assert_eq!(ranked[1].title, "Seen");
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = vec![
            book(1, "First", "Ann", Some("Sci-Fi")),
            book(2, "Second", "Bob", Some("Sci-Fi")),
            book(3, "Third", "Cid", Some("Sci-Fi")),
        ];

        let ranked = rank(catalog.clone(), &fiction_fan());
        assert_eq!(ranked, catalog);
    }

    #[test]
    fn ranking_is_deterministic() {
        let mut ctx = fiction_fan();
        ctx.profile.recently_viewed_authors = vec!["Bob".to_string()];
        ctx.profile.recently_viewed_books = vec![Uuid::from_u128(1)];

        let catalog = vec![
            book(1, "A", "Ann", Some("Fiction")),
            book(2, "B", "Bob", None),
            book(3, "C", "Cid", Some("Fiction")),
        ];

        let first = rank(catalog.clone(), &ctx);
        let second = rank(catalog, &ctx);
        assert_eq!(first, second);
    }
}
