//! In-memory element tree usable as a [`rowpool::ScrollSurface`].

pub mod dom;
pub mod element;
pub mod event;
pub mod focus;

pub use dom::{Dom, NodeId};
pub use element::Element;
pub use event::FocusEvent;
pub use focus::{collect_focusable, FocusState};
