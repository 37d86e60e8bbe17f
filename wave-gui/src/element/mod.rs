pub mod button;
pub mod wave;

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle};
use crate::draw_target::FrameBuffer;
use crate::input::Event;

pub const DEFAULT_PRIMITIVE_STYLE: PrimitiveStyle<BinaryColor> = PrimitiveStyleBuilder::new()
    .stroke_width(2)
    .stroke_color(BinaryColor::On)
    .fill_color(BinaryColor::Off)
    .build();
pub const DEFAULT_TEXT_STYLE: MonoTextStyle<BinaryColor> = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);

/// An element that can be drawn to the frame buffer and reacts to events.
pub trait Gui {
    type Output;

    /// Draw the element in its current state.
    fn draw_init(&self, target: &mut FrameBuffer);

    /// Handle an event, redrawing into `target` as needed.
    fn tick(&mut self, target: &mut FrameBuffer, ev: Event) -> Self::Output;

    fn bounding_box(&self) -> Rectangle;
}
