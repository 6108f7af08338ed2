pub mod creature;
pub mod pagination;

pub use creature::{BaseStats, Creature};
pub use pagination::{Page, PageCursor};
