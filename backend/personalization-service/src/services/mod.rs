pub mod affinity;
pub mod consent;
pub mod ranking;
pub mod tracker;

pub use consent::ConsentService;
pub use tracker::BehaviorTracker;
