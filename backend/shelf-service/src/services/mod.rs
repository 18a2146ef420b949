pub mod follow;
pub mod shelf;
pub mod visibility;

pub use follow::FollowService;
pub use shelf::ShelfService;
