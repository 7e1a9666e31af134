//! Terminal presentation: replies, markdown-lite, toasts, themes.

pub mod input;
pub mod markdown;
pub mod render;
pub mod reply;
pub mod theme;
pub mod toast;

pub use input::{CounterLevel, InputGauge};
pub use render::Renderer;
pub use reply::Reply;
pub use theme::{Palette, Theme, ThemeStore};
pub use toast::{Toast, ToastKind};
