use core::convert::Infallible;
use embedded_graphics::prelude::*;
use embedded_graphics::geometry::Dimensions;
use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::Rectangle;

/// The horizontal size of the panel in pixels.
pub const DIM_X: usize = 240;
/// The vertical size of the panel in pixels.
pub const DIM_Y: usize = 416;
/// The number of bytes in a frame, equal to `(DIM_X * DIM_Y) / 8`.
pub const IMAGE_BYTES: usize = (DIM_X * DIM_Y) / 8;

/// A 1-bit frame buffer covering the whole panel. Pixels are packed row-major, LSB first.
pub struct FrameBuffer {
    buf: [u8; IMAGE_BYTES],
}

impl Dimensions for FrameBuffer {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(Point::new(0, 0), Size::new(DIM_X as u32, DIM_Y as u32))
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, colour) in pixels {
            let Some((i, j)) = Self::locate(point) else {
                continue;
            };

            match colour {
                BinaryColor::Off => self.buf[i] &= !j,
                BinaryColor::On => self.buf[i] |= j,
            }
        }

        Ok(())
    }

    fn clear(&mut self, colour: Self::Color) -> Result<(), Self::Error> {
        match colour {
            BinaryColor::Off => self.buf.fill(0),
            BinaryColor::On => self.buf.fill(u8::MAX),
        }

        Ok(())
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            buf: [0; IMAGE_BYTES]
        }
    }

    fn locate(Point { x, y }: Point) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x as usize >= DIM_X || y as usize >= DIM_Y {
            return None;
        }

        let bit_index = (y as usize) * DIM_X + (x as usize);
        Some((bit_index >> 3, 1 << (bit_index & 0x07)))
    }

    /// Read back a single pixel, or `None` if the point is off the panel.
    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        Self::locate(point).map(|(i, j)| BinaryColor::from(self.buf[i] & j != 0))
    }

    /// Iterate over the pixels of `area`, one row at a time. Off-panel pixels read as `Off`.
    pub fn rows(&self, area: Rectangle) -> impl Iterator<Item = impl Iterator<Item = BinaryColor> + '_> + '_ {
        let x_range = area.top_left.x..area.top_left.x + area.size.width as i32;
        let y_range = area.top_left.y..area.top_left.y + area.size.height as i32;

        y_range.map(move |y| {
            x_range
                .clone()
                .map(move |x| self.pixel(Point::new(x, y)).unwrap_or(BinaryColor::Off))
        })
    }

    /// Count the pixels in `area` that are switched on.
    pub fn count_on(&self, area: Rectangle) -> usize {
        self.rows(area)
            .flatten()
            .filter(|c| c.is_on())
            .count()
    }

    pub fn as_bytes(&self) -> &[u8; IMAGE_BYTES] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn draws_and_reads_back_pixels() {
        let mut fb = FrameBuffer::new();
        Pixel(Point::new(3, 5), BinaryColor::On).draw(&mut fb).unwrap();

        assert_eq!(fb.pixel(Point::new(3, 5)), Some(BinaryColor::On));
        assert_eq!(fb.pixel(Point::new(4, 5)), Some(BinaryColor::Off));
        assert_eq!(fb.as_bytes()[(5 * DIM_X + 3) / 8], 1 << 3);
    }

    #[test]
    fn ignores_off_panel_pixels() {
        let mut fb = FrameBuffer::new();
        Rectangle::new(Point::new(-10, -10), Size::new(12, 12))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();

        assert_eq!(fb.pixel(Point::new(-1, 0)), None);
        assert_eq!(fb.count_on(fb.bounding_box()), 4);
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut fb = FrameBuffer::new();
        fb.clear(BinaryColor::On).unwrap();
        assert_eq!(fb.count_on(fb.bounding_box()), DIM_X * DIM_Y);

        fb.clear(BinaryColor::Off).unwrap();
        assert_eq!(fb.count_on(fb.bounding_box()), 0);
    }

    #[test]
    fn rows_cover_the_requested_area() {
        let fb = FrameBuffer::new();
        let area = Rectangle::new(Point::new(DIM_X as i32 - 2, 0), Size::new(4, 3));
        let rows: Vec<Vec<BinaryColor>> = fb.rows(area).map(|r| r.collect()).collect();

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 4));
    }
}
