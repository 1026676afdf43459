pub mod decor;

pub use decor::{decor_panels, floating_badge, DecorConfig};
