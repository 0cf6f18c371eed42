//! Terminal front end for a trio-stack session.
//!
//! Rendering goes through a plain framebuffer rather than a widget toolkit, so the
//! board projection (play-area units to character cells) stays under our control and
//! mouse clicks can be mapped back onto the exact pattern drawn under the pointer.
//!
//! - [`fb`]: styled cell grid
//! - [`board_view`]: session to framebuffer, plus the cell/point projection
//! - [`renderer`]: terminal mode handling and row-diff flushing

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use trio_stack_core as core;
pub use trio_stack_types as types;

pub use board_view::{type_glyph, world_bounds, BoardView, Projection, Viewport, PANEL_WIDTH};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::TerminalRenderer;
