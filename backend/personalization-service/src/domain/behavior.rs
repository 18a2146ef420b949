use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bounds for the recency lists
pub const MAX_RECENT_GENRES: usize = 5;
pub const MAX_RECENT_AUTHORS: usize = 5;
pub const MAX_RECENT_BOOKS: usize = 10;
pub const MAX_SEARCH_HISTORY: usize = 10;

/// Interaction count for one genre.
///
/// Counts are kept as an insertion-ordered list rather than a map so that
/// ties rank by first-seen genre. That ordering is part of the contract, not
/// an accident of map iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: u32,
}

/// Tracked behavior for one user: what they recently viewed and searched,
/// and how often they touched each genre. All recency lists are
/// most-recent-first and de-duplicated; a repeat view promotes to the front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BehaviorProfile {
    pub recently_viewed_genres: Vec<String>,
    pub recently_viewed_authors: Vec<String>,
    pub recently_viewed_books: Vec<Uuid>,
    pub search_history: Vec<String>,
    pub interactions_by_genre: Vec<GenreCount>,
}

/// Push to the front, dropping any prior occurrence, capped at `max`.
fn push_recent<T: PartialEq>(list: &mut Vec<T>, value: T, max: usize) {
    list.retain(|v| *v != value);
    list.insert(0, value);
    list.truncate(max);
}

impl BehaviorProfile {
    /// No signal recorded yet. Ranking treats this as cold start and leaves
    /// the catalog untouched.
    pub fn is_cold(&self) -> bool {
        self.interactions_by_genre.is_empty() && self.recently_viewed_genres.is_empty()
    }

    /// Record a book view: the book always, genre and author when known.
    pub fn record_view(&mut self, book_id: Uuid, genre: Option<&str>, author: Option<&str>) {
        push_recent(&mut self.recently_viewed_books, book_id, MAX_RECENT_BOOKS);

        if let Some(genre) = genre {
            push_recent(
                &mut self.recently_viewed_genres,
                genre.to_string(),
                MAX_RECENT_GENRES,
            );
            self.bump_genre(genre);
        }

        if let Some(author) = author {
            push_recent(
                &mut self.recently_viewed_authors,
                author.to_string(),
                MAX_RECENT_AUTHORS,
            );
        }
    }

    /// Record a search query. Blank queries are ignored.
    pub fn record_search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        push_recent(
            &mut self.search_history,
            query.to_string(),
            MAX_SEARCH_HISTORY,
        );
    }

    /// Genres ranked by interaction count, highest first; ties keep
    /// first-seen order.
    pub fn genres_by_interaction(&self) -> Vec<&str> {
        let mut ranked: Vec<&GenreCount> = self.interactions_by_genre.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.into_iter().map(|gc| gc.genre.as_str()).collect()
    }

    fn bump_genre(&mut self, genre: &str) {
        match self
            .interactions_by_genre
            .iter_mut()
            .find(|gc| gc.genre == genre)
        {
            Some(gc) => gc.count += 1,
            None => self.interactions_by_genre.push(GenreCount {
                genre: genre.to_string(),
                count: 1,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn recent_books_are_bounded_and_deduplicated() {
        let mut profile = BehaviorProfile::default();
        for n in 0..15 {
            profile.record_view(book(n), None, None);
        }

        assert_eq!(profile.recently_viewed_books.len(), MAX_RECENT_BOOKS);
        // Most recent first
        assert_eq!(profile.recently_viewed_books[0], book(14));
        // Oldest five fell off
        assert!(!profile.recently_viewed_books.contains(&book(4)));
    }

    #[test]
    fn repeat_view_promotes_to_front_without_duplicate() {
        let mut profile = BehaviorProfile::default();
        profile.record_view(book(1), None, None);
        profile.record_view(book(2), None, None);
        profile.record_view(book(1), None, None);

        assert_eq!(profile.recently_viewed_books, vec![book(1), book(2)]);
    }

    #[test]
    fn genre_views_bump_interaction_counts() {
        let mut profile = BehaviorProfile::default();
        profile.record_view(book(1), Some("Fiction"), None);
        profile.record_view(book(2), Some("Fiction"), None);
        profile.record_view(book(3), Some("Mystery"), None);

        assert_eq!(
            profile.interactions_by_genre,
            vec![
                GenreCount {
                    genre: "Fiction".to_string(),
                    count: 2
                },
                GenreCount {
                    genre: "Mystery".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn interaction_ranking_breaks_ties_by_first_seen() {
        let mut profile = BehaviorProfile::default();
        profile.record_view(book(1), Some("Horror"), None);
        profile.record_view(book(2), Some("Romance"), None);

        assert_eq!(profile.genres_by_interaction(), vec!["Horror", "Romance"]);
    }

    #[test]
    fn blank_searches_are_ignored() {
        let mut profile = BehaviorProfile::default();
        profile.record_search("   ");
        profile.record_search("");
        assert!(profile.search_history.is_empty());

        profile.record_search("rust in practice");
        assert_eq!(profile.search_history, vec!["rust in practice"]);
    }

    #[test]
    fn search_history_is_bounded_with_exact_match_dedup() {
        let mut profile = BehaviorProfile::default();
        for n in 0..12 {
            profile.record_search(&format!("query {n}"));
        }
        profile.record_search("query 11");

        assert_eq!(profile.search_history.len(), MAX_SEARCH_HISTORY);
        assert_eq!(profile.search_history[0], "query 11");
    }

    #[test]
    fn cold_start_is_detected() {
        let mut profile = BehaviorProfile::default();
        assert!(profile.is_cold());

        // A bare book view carries no genre signal
        profile.record_view(book(1), None, None);
        assert!(profile.is_cold());

        profile.record_view(book(2), Some("Fiction"), None);
        assert!(!profile.is_cold());
    }
}
