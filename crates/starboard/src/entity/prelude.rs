//! Common re-exports for convenient entity usage.

pub use super::favorite::{
    ActiveModel as FavoriteActiveModel, Column as FavoriteColumn, Entity as Favorite,
    Model as FavoriteModel,
};
