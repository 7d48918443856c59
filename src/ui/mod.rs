//! Page controllers
//!
//! Each controller is a small state machine here; the DOM wiring that feeds
//! it events lives in the binary's web entry point.

pub mod modal;
pub mod reveal;
pub mod typewriter;

pub use modal::{Display, Modal, ModalClick, ModalConfig};
pub use reveal::{RevealAction, RevealBoard, SectionId, SectionState};
pub use typewriter::{TextSink, Typewriter, start_typewriter};
