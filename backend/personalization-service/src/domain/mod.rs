pub mod behavior;
pub mod catalog;
pub mod preferences;

pub use behavior::{BehaviorProfile, GenreCount};
pub use catalog::CatalogBook;
pub use preferences::{ConsentState, PersonalizationContext, UserPreferences};
