//! Rectangular text entry widgets.

mod border;
mod builder;
mod geometry;
mod text_widget;
pub mod wrap;

pub use border::BorderStyle;
pub use builder::TextWidgetBuilder;
pub use geometry::{effective_cap, LayoutMode, Padding, Position, Rect, TextArea};
pub use text_widget::{TextWidget, WidgetOptions};
