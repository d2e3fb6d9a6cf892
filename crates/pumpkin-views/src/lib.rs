//! Headless view tree used to drive Pumpkin layout states without a real UI toolkit.

mod states;
mod view;

pub use states::{Change, PropertyState};
pub use view::{log_view_tree, Size, View, ViewError, Visibility};

pub mod prelude {
    pub use crate::states::{Change, PropertyState};
    pub use crate::view::{Size, View, Visibility};
}
