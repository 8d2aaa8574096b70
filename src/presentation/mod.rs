pub mod messages;
pub mod render;

pub use messages::{Locale, Messages};
pub use render::{render_result, render_state, render_unconfigured};
