pub mod preferences;

pub use preferences::{PostgresPreferenceRepository, PreferenceRepository};
