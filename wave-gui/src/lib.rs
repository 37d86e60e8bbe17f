//! Touch GUI elements for 1-bit panels, including an animated wave fill gauge.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod draw_target;
pub mod element;
pub mod input;
pub mod time;

pub use draw_target::{DIM_X, DIM_Y, IMAGE_BYTES};
