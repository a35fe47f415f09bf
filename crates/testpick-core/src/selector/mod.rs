mod accept;
mod normalize;
mod types;

pub use accept::accepts;
pub use normalize::normalize;
pub(crate) use types::write_names;
pub use types::Selector;
