//! SeaORM entity definitions for the starboard database schema.

pub mod favorite;
pub mod prelude;
