//! Value-snapping range slider for iced
//!
//! A track populated with discrete labelled positions ("dashes"). The user
//! selects one by clicking the track or dragging the handle; the handle
//! always snaps to the nearest dash on release.
//!
//! ## Architecture
//!
//! - **config**: partial user options overlaid on defaults, YAML persistence
//! - **values**: validated discrete value set
//! - **layout**: pure geometry (dash offsets, handle offset, active window)
//! - **nearest**: pixel offset → closest dash
//! - **interaction**: Idle/Dragging state machine for mouse and touch
//! - **render**: declarative `Scene` + `RenderSync` driving a `RenderBackend`
//! - **binding**: get/set value with change and touched observers
//! - **slider**: `DashSlider`, the component tying it all together
//! - **canvas** / **view**: iced canvas backend and view function
//!
//! ## Usage
//!
//! ```ignore
//! let mut slider: DashSlider = DashSlider::new(values, &SliderOptions::default(), Some(14.0))?;
//! slider.on_change(|v| log::info!("font size {}", v));
//!
//! // view
//! slider.view(Message::FontSize)
//!
//! // update
//! Message::FontSize(event) => { slider.handle_event(event)?; }
//! ```

pub mod binding;
pub mod canvas;
pub mod config;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod nearest;
pub mod render;
pub mod slider;
pub mod theme;
pub mod values;
mod view;

pub use binding::ValueBinding;
pub use canvas::{CanvasBackend, SliderCanvas, SliderInteraction};
pub use config::{
    default_options_path, load_options, ColorBand, ResolvedOptions, SliderOptions,
    TrackWidth,
};
pub use error::SliderError;
pub use interaction::{Controller, DragSession, DragUpdate, InteractionState, PointerSource};
pub use layout::{ActiveWindow, DashState, Layout};
pub use nearest::{nearest_dash, nearest_value};
pub use render::{Metrics, RenderBackend, RenderSync, Scene, SyncOutcome};
pub use slider::{DashSlider, SliderEvent};
pub use values::{DiscreteValue, Label, ValueSet};
pub use view::dash_slider;
