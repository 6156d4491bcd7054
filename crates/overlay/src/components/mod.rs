//! HUD element kinds.

mod scroll_menu;
mod text_message;
mod textured_box;

pub use scroll_menu::{ScrollMenu, ScrollMenuMut, TAB_COLOR};
pub use text_message::{TextAlignment, TextHudMessage};
pub use textured_box::TexturedBox;
