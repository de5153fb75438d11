//! Recycling engine for virtualized lists.
//!
//! A [`VirtualizationController`] displays an arbitrarily large logical item
//! sequence through a small window of [`PooledItem`]s, rebinding them as the
//! viewport scrolls. The scroll surface, the data source and the drag
//! subsystem are collaborators supplied by the host through the traits in
//! [`surface`].

pub mod background;
pub mod config;
pub mod controller;
pub mod error;
pub mod focus;
pub mod item;
pub mod pool;
pub mod surface;
pub mod window;

pub use background::{filler_row_count, BackgroundFiller};
pub use config::RecyclerConfig;
pub use controller::{VirtualizationController, MAX_WINDOW_SLOTS};
pub use error::ConfigError;
pub use focus::{FocusAction, FocusTracker};
pub use item::{ItemId, PooledItem, SlotId};
pub use pool::RecyclingPool;
pub use surface::{DataSource, DragSource, NoDrag, ScrollSurface};
pub use window::ActiveWindow;

/// Class toggled on rows (and filler rows) with an odd logical index.
pub const ALT_ROW_CLASS: &str = "row--alt";
