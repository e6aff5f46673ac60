//! Visual effects
//!
//! - `glitch` - per-frame screen corruption effects and their level stacking
//! - `shatter` - particle burst used when the screen breaks apart

pub mod glitch;
pub mod shatter;

pub use shatter::{ShardPool, SHATTER_COUNT};
