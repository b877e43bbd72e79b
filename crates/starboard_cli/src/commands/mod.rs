pub(crate) mod fav;
pub(crate) mod favorites;
pub(crate) mod meta;
pub(crate) mod migrate;
pub(crate) mod search;
pub(crate) mod shared;
pub(crate) mod show;
