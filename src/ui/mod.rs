//! Menu widgets drawn into the software framebuffer

mod menu;

pub use menu::{MenuEntry, MenuLayout, VerticalMenu};
