//! Tracker overlay: derived state, layout and the retained presenter.

mod format;
mod layout;
mod presenter;
mod settings;
mod state;

pub use format::format_readout;
pub use layout::{OverlayLayout, layout_overlay};
pub use presenter::{NodeVisual, OverlayNode, OverlayPresenter, OverlayScene, OverlayTransition};
pub use settings::{OverlayTiming, TrackerSettings};
pub use state::{OverlaySide, OverlayState, SeriesReadout};
