//! Genre affinity, derived on demand from the behavior profile.
//!
//! Nothing here is cached or stored: favorite genres are recomputed from the
//! interaction counts on every read.

use crate::domain::PersonalizationContext;

/// How many top interaction genres seed the favorites list
const TOP_INTERACTION_GENRES: usize = 3;
/// Upper bound on the derived favorites list
const MAX_FAVORITE_GENRES: usize = 5;

/// The user's favored genres: the top 3 by interaction count (ties in
/// first-seen order), extended with recently viewed genres not already
/// present, capped at 5. Empty without consent or behavior data.
pub fn favorite_genres(ctx: &PersonalizationContext) -> Vec<String> {
    if !ctx.consented {
        return Vec::new();
    }

    let mut favorites: Vec<String> = ctx
        .profile
        .genres_by_interaction()
        .into_iter()
        .take(TOP_INTERACTION_GENRES)
        .map(str::to_string)
        .collect();

    for genre in &ctx.profile.recently_viewed_genres {
        if !favorites.iter().any(|g| g == genre) {
            favorites.push(genre.clone());
        }
    }

    favorites.truncate(MAX_FAVORITE_GENRES);
    favorites
}

/// Whether a genre deserves highlighting for this user: either an explicit
/// favorite from their settings or one of their top 3 interaction genres.
pub fn should_highlight(ctx: &PersonalizationContext, genre: &str) -> bool {
    if !ctx.consented {
        return false;
    }

    if let Some(explicit) = &ctx.preferences.favorite_genres {
        if explicit.iter().any(|g| g == genre) {
            return true;
        }
    }

    ctx.profile
        .genres_by_interaction()
        .into_iter()
        .take(TOP_INTERACTION_GENRES)
        .any(|g| g == genre)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BehaviorProfile, GenreCount, UserPreferences};

    fn ctx_with(profile: BehaviorProfile) -> PersonalizationContext {
        PersonalizationContext {
            consented: true,
            profile,
            preferences: UserPreferences::default(),
        }
    }

    fn counts(pairs: &[(&str, u32)]) -> Vec<GenreCount> {
        pairs
            .iter()
            .map(|(genre, count)| GenreCount {
                genre: genre.to_string(),
                count: *count,
            })
            .collect()
    }

    #[test]
    fn no_consent_means_no_favorites() {
        let ctx = PersonalizationContext::without_consent();
        assert!(favorite_genres(&ctx).is_empty());
        assert!(!should_highlight(&ctx, "Fiction"));
    }

    #[test]
    fn top_interactions_union_recent_views() {
        let mut profile = BehaviorProfile::default();
        profile.interactions_by_genre = counts(&[("Fiction", 5), ("Mystery", 2)]);
        profile.recently_viewed_genres = vec!["Fantasy".to_string()];

        assert_eq!(
            favorite_genres(&ctx_with(profile)),
            vec!["Fiction", "Mystery", "Fantasy"]
        );
    }

    #[test]
    fn recent_duplicates_are_not_repeated() {
        let mut profile = BehaviorProfile::default();
        profile.interactions_by_genre = counts(&[("Fiction", 5), ("Mystery", 2)]);
        profile.recently_viewed_genres = vec!["Mystery".to_string(), "Horror".to_string()];

        assert_eq!(
            favorite_genres(&ctx_with(profile)),
            vec!["Fiction", "Mystery", "Horror"]
        );
    }

    #[test]
    fn favorites_are_capped_at_five() {
        let mut profile = BehaviorProfile::default();
        profile.interactions_by_genre =
            counts(&[("A", 9), ("B", 8), ("C", 7), ("D", 6), ("E", 5)]);
        profile.recently_viewed_genres =
            vec!["V".to_string(), "W".to_string(), "X".to_string()];

        let favorites = favorite_genres(&ctx_with(profile));
        assert_eq!(favorites, vec!["A", "B", "C", "V", "W"]);
    }

    #[test]
    fn explicit_preference_highlights_regardless_of_interactions() {
        let mut ctx = ctx_with(BehaviorProfile::default());
        ctx.preferences.favorite_genres = Some(vec!["Poetry".to_string()]);

        assert!(should_highlight(&ctx, "Poetry"));
        assert!(!should_highlight(&ctx, "Fiction"));
    }

    #[test]
    fn top_three_interaction_genres_highlight() {
        let mut profile = BehaviorProfile::default();
        profile.interactions_by_genre =
            counts(&[("A", 9), ("B", 8), ("C", 7), ("D", 6)]);

        let ctx = ctx_with(profile);
        assert!(should_highlight(&ctx, "A"));
        assert!(should_highlight(&ctx, "C"));
        assert!(!should_highlight(&ctx, "D"));
    }
}
