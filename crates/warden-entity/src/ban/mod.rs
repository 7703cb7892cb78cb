//! Ban domain entities.

pub mod duration;
pub mod model;

pub use duration::{BanDuration, ResolvedDuration};
pub use model::{Ban, CreateBan};
