//! Field rendering module
//!
//! Draws through the `Surface` trait: a 2D canvas context in the browser, a
//! `CommandBuffer` everywhere else.

pub mod color;
pub mod draw;
pub mod surface;

pub use color::{Paint, Rgb};
pub use draw::{
    Connection, GridStyle, TraceStyle, connections, draw_connections, draw_grid, draw_particle,
    trace_path,
};
pub use surface::{CommandBuffer, DrawCommand, Surface};
