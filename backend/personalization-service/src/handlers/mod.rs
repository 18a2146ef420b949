pub mod consent;
pub mod events;
pub mod genres;
pub mod preferences;
pub mod recommendations;
