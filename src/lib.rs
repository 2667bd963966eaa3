//! Unified `tap` / `dbltap` gestures for mouse and touch input, and a
//! dispatcher that runs exactly one action per multi-click series.
//!
//! The host supplies raw [`input::PointerEvent`]s, a [`timer::Clock`], a
//! [`timer::Scheduler`] and an [`dispatch::EventSink`]; everything else is
//! owned per bound target.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod gesture;
pub mod input;
pub mod timer;

pub use config::Config;
pub use dispatch::{Delivery, Emission, EventSink, TapEvent, TapKind};
pub use error::{Error, Result};
pub use gesture::{
    ExclusiveDispatcher, Modality, TapAdapter, TapBinding, Thresholds, UnifiedTapHandler,
};
pub use input::{PointerEvent, TargetId};
