//! Wave outline geometry.
//!
//! The outline starts a full wave length to the left of the view (shifted right by the move
//! distance), runs a chain of alternating up/down quadratic arcs until it is a wave length past
//! the right edge, then drops to the bottom corners and closes. All coordinates are local to the
//! view, with the origin at its top left corner.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Rectangle};
use super::style::Shape;

/// Straight segments used to approximate each arc when rasterising.
const ARC_SEGMENTS: u32 = 8;

/// A single step of a path, in absolute view coordinates.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    QuadTo { ctrl: Point, end: Point },
    LineTo(Point),
    Close,
}

/// Everything needed to lay out one frame of the wave.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct WaveGeometry {
    pub size: Size,
    pub percentage: u8,
    pub wave_length: u32,
    pub wave_height: u32,
    pub move_distance: u32,
    pub shape: Shape,
}

impl WaveGeometry {
    fn width(&self) -> i32 {
        self.size.width as i32
    }

    fn height(&self) -> i32 {
        self.size.height as i32
    }

    /// The y coordinate the wave starts at. A circle in a tall view only spans the middle
    /// `width` pixels, so the fill level is measured against that band instead.
    pub fn origin_y(&self) -> i32 {
        let empty = 100 - self.percentage.min(100) as i32;
        let (w, h) = (self.width(), self.height());

        if self.shape == Shape::Circle && h > w {
            (h / 2 - w / 2) + empty * w / 100 - self.wave_height as i32
        } else {
            empty * h / 100 - self.wave_height as i32
        }
    }

    /// The circle the wave is clipped to, centred with a radius of half the shorter side.
    pub fn clip_circle(&self) -> Circle {
        let (w, h) = (self.width(), self.height());
        let radius = w.min(h) / 2;
        Circle::new(Point::new(w / 2 - radius, h / 2 - radius), 2 * radius as u32)
    }

    fn clip(&self) -> Clip {
        match self.shape {
            Shape::Circle => Clip::Circle(self.clip_circle()),
            Shape::Rectangle => Clip::Rectangle(Rectangle::new(Point::zero(), self.size)),
        }
    }

    /// The closed outline of the wave.
    pub fn path(&self) -> WavePath {
        let wave_length = self.wave_length as i32;
        let start = Point::new(-wave_length + self.move_distance as i32, self.origin_y());

        WavePath {
            start,
            current: start,
            half: wave_length / 2,
            wave_length,
            wave_height: self.wave_height as i32,
            width: self.width(),
            height: self.height(),
            i: -wave_length,
            rising: true,
            stage: Stage::Move,
        }
    }

    /// Points along the top edge of the wave, flattened into straight segments.
    pub fn surface(&self) -> SurfacePoints {
        SurfacePoints {
            path: self.path(),
            current: (0.0, 0.0),
            arc: None,
            step: 0,
            done: false,
        }
    }

    /// All pixels inside the wave fill, clipped to the shape, in column-major order.
    pub fn fill_points(self) -> impl Iterator<Item = Point> {
        let clip = self.clip();
        let (width, height) = (self.width(), self.height());
        let mut walker = SurfaceWalker::new(self.surface());

        (0..width)
            .flat_map(move |x| {
                let top = walker
                    .y_at(x as f32 + 0.5)
                    .map_or(height, |y| ceil(y - 0.5).clamp(0, height));
                (top..height).map(move |y| Point::new(x, y))
            })
            .filter(move |p| clip.contains(*p))
    }
}

#[derive(Copy, Clone, Debug)]
enum Clip {
    Circle(Circle),
    Rectangle(Rectangle),
}

impl Clip {
    fn contains(&self, p: Point) -> bool {
        match self {
            Clip::Circle(c) => c.contains(p),
            Clip::Rectangle(r) => r.contains(p),
        }
    }
}

fn ceil(v: f32) -> i32 {
    let t = v as i32;
    if (t as f32) < v { t + 1 } else { t }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Stage {
    Move,
    Arcs,
    BottomRight,
    BottomLeft,
    Close,
    Done,
}

/// Iterator over the commands of a wave outline. Produced by [`WaveGeometry::path`].
#[derive(Clone, Debug)]
pub struct WavePath {
    start: Point,
    current: Point,
    half: i32,
    wave_length: i32,
    wave_height: i32,
    width: i32,
    height: i32,
    i: i32,
    rising: bool,
    stage: Stage,
}

impl WavePath {
    fn arcs_remaining(&self) -> bool {
        self.i <= self.width + self.wave_length
    }

    fn next_arc(&mut self) -> PathCommand {
        let lift = if self.rising { -self.wave_height } else { self.wave_height };
        let ctrl = self.current + Point::new(self.half / 2, lift);
        let end = self.current + Point::new(self.half, 0);

        if !self.rising {
            self.i += self.wave_length;
            if !self.arcs_remaining() {
                self.stage = Stage::BottomRight;
            }
        }

        self.rising = !self.rising;
        self.current = end;
        PathCommand::QuadTo { ctrl, end }
    }
}

impl Iterator for WavePath {
    type Item = PathCommand;

    fn next(&mut self) -> Option<PathCommand> {
        match self.stage {
            Stage::Move => {
                self.stage = if self.arcs_remaining() { Stage::Arcs } else { Stage::BottomRight };
                Some(PathCommand::MoveTo(self.start))
            },
            Stage::Arcs => Some(self.next_arc()),
            Stage::BottomRight => {
                self.stage = Stage::BottomLeft;
                self.current = Point::new(self.width, self.height);
                Some(PathCommand::LineTo(self.current))
            },
            Stage::BottomLeft => {
                self.stage = Stage::Close;
                self.current = Point::new(0, self.height);
                Some(PathCommand::LineTo(self.current))
            },
            Stage::Close => {
                self.stage = Stage::Done;
                self.current = self.start;
                Some(PathCommand::Close)
            },
            Stage::Done => None,
        }
    }
}

type Arc = ((f32, f32), (f32, f32), (f32, f32));

fn to_f32(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

fn quad_at(((x0, y0), (x1, y1), (x2, y2)): Arc, t: f32) -> (f32, f32) {
    let u = 1.0 - t;
    (
        u * u * x0 + 2.0 * u * t * x1 + t * t * x2,
        u * u * y0 + 2.0 * u * t * y1 + t * t * y2,
    )
}

/// Flattened top edge of a wave outline. Produced by [`WaveGeometry::surface`].
///
/// The x coordinates never decrease: each arc's control point sits at or before the middle of
/// the arc. If the arcs end before the right edge, the surface continues down the line to the
/// bottom right corner.
#[derive(Clone, Debug)]
pub struct SurfacePoints {
    path: WavePath,
    current: (f32, f32),
    arc: Option<Arc>,
    step: u32,
    done: bool,
}

impl Iterator for SurfacePoints {
    type Item = (f32, f32);

    fn next(&mut self) -> Option<(f32, f32)> {
        loop {
            if let Some(arc) = self.arc {
                self.step += 1;
                if self.step == ARC_SEGMENTS {
                    self.arc = None;
                }
                self.current = quad_at(arc, self.step as f32 / ARC_SEGMENTS as f32);
                return Some(self.current);
            }

            if self.done {
                return None;
            }

            match self.path.next() {
                Some(PathCommand::MoveTo(p)) => {
                    self.current = to_f32(p);
                    return Some(self.current);
                },
                Some(PathCommand::QuadTo { ctrl, end }) => {
                    self.arc = Some((self.current, to_f32(ctrl), to_f32(end)));
                    self.step = 0;
                },
                // odd wave lengths stop the arcs short of the right edge
                Some(PathCommand::LineTo(p)) => {
                    self.done = true;
                    let p = to_f32(p);
                    if p.0 > self.current.0 {
                        self.current = p;
                        return Some(p);
                    }
                },
                _ => self.done = true,
            }
        }
    }
}

/// Walks a surface left to right, answering height queries for increasing x.
struct SurfaceWalker {
    points: SurfacePoints,
    prev: Option<(f32, f32)>,
    next: Option<(f32, f32)>,
}

impl SurfaceWalker {
    fn new(mut points: SurfacePoints) -> Self {
        let next = points.next();
        Self { points, prev: None, next }
    }

    /// Height of the surface at `x`. Queries must not go backwards.
    fn y_at(&mut self, x: f32) -> Option<f32> {
        while let Some(next) = self.next {
            if next.0 >= x {
                break;
            }
            self.prev = Some(next);
            self.next = self.points.next();
        }

        match (self.prev, self.next) {
            (Some((x0, y0)), Some((x1, y1))) if x1 > x0 => Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0)),
            (_, Some((_, y))) => Some(y),
            (Some(_), None) | (None, None) => None,
        }
    }
}
