use std::convert::Infallible;
use std::io::{self, Write};
use embedded_graphics::prelude::*;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::Pixel;
use wave_gui::draw_target::FrameBuffer;

/// A 1-bit image that can be written out.
pub trait Bitmap {
    fn size(&self) -> Size;
    fn is_on(&self, p: Point) -> bool;
}

/// An arbitrarily sized 1-bit draw target for rendering a single element.
pub struct Canvas {
    size: Size,
    pixels: Vec<bool>,
}

impl Canvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![false; pixel_count(size)],
        }
    }

    fn index(&self, Point { x, y }: Point) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.size.width || y as u32 >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }
}

fn pixel_count(size: Size) -> usize {
    size.width as usize * size.height as usize
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, colour) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = colour.is_on();
            }
        }

        Ok(())
    }
}

impl Bitmap for Canvas {
    fn size(&self) -> Size {
        self.size
    }

    fn is_on(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.pixels[i])
    }
}

impl Bitmap for FrameBuffer {
    fn size(&self) -> Size {
        self.bounding_box().size
    }

    fn is_on(&self, p: Point) -> bool {
        self.pixel(p).is_some_and(|c| c.is_on())
    }
}

/// Render as text. Each character covers `scale` pixels across and `2 * scale` down, since
/// terminal cells are about twice as tall as they are wide.
pub fn to_text(bitmap: &impl Bitmap, scale: u32) -> String {
    let scale = scale.max(1);
    let size = bitmap.size();
    let (cell_w, cell_h) = (scale, scale * 2);
    let mut out = String::new();

    for row in (0..size.height).step_by(cell_h as usize) {
        for col in (0..size.width).step_by(cell_w as usize) {
            let mut on = 0;
            let mut total = 0;
            for y in row..(row + cell_h).min(size.height) {
                for x in col..(col + cell_w).min(size.width) {
                    total += 1;
                    if bitmap.is_on(Point::new(x as i32, y as i32)) {
                        on += 1;
                    }
                }
            }

            out.push(match on {
                0 => ' ',
                n if n * 2 >= total => '#',
                _ => '.',
            });
        }
        out.push('\n');
    }

    out
}

/// Write a binary (P4) PBM image. Set pixels are black.
pub fn write_pbm(bitmap: &impl Bitmap, out: &mut impl Write) -> io::Result<()> {
    let size = bitmap.size();
    write!(out, "P4\n{} {}\n", size.width, size.height)?;

    let row_bytes = size.width.div_ceil(8) as usize;
    let mut row = vec![0u8; row_bytes];
    for y in 0..size.height as i32 {
        row.fill(0);
        for x in 0..size.width as i32 {
            if bitmap.is_on(Point::new(x, y)) {
                row[x as usize / 8] |= 0x80 >> (x % 8);
            }
        }
        out.write_all(&row)?;
    }

    Ok(())
}
