use embedded_graphics::prelude::*;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use crate::draw_target::FrameBuffer;
use crate::element::Gui;
use crate::input::Event;
use crate::time::Instant;
use super::animator::WaveAnimator;
use super::path::{WaveGeometry, WavePath};
use super::style::{Shape, WaveStyle};

const DEFAULT_PERCENTAGE: u8 = 50;

/// An animated wave filling a circle or rectangle up to a percentage.
#[derive(Clone, Debug)]
pub struct WaveView<C> {
    bounds: Rectangle,
    style: WaveStyle<C>,
    background: Option<C>,
    percentage: u8,
    move_distance: u32,
    animator: WaveAnimator,
    dirty: bool,
}

impl<C: PixelColor> WaveView<C> {
    /// A wave view occupying `bounds`. Drawn through [`Gui`], the bounds are cleared to `Off`
    /// before every frame; as a plain [`Drawable`] nothing under the view is cleared unless a
    /// background is set with [`WaveView::with_background`].
    pub fn new(bounds: Rectangle, style: WaveStyle<C>) -> Self {
        if let Err(e) = style.validate() {
            warn!("wave view created with invalid style: {}", e);
        }

        Self {
            bounds,
            animator: WaveAnimator::new(style.wave_length, style.duration),
            style,
            background: None,
            percentage: DEFAULT_PERCENTAGE,
            move_distance: 0,
            dirty: true,
        }
    }

    /// Clear the view's bounds to `colour` before every draw.
    pub fn with_background(mut self, colour: C) -> Self {
        self.background = Some(colour);
        self
    }

    pub fn style(&self) -> &WaveStyle<C> {
        &self.style
    }

    pub fn start_anim(&mut self) {
        if self.animator.start() {
            debug!("wave animation started");
        }
    }

    pub fn stop_anim(&mut self) {
        if self.animator.stop() {
            debug!("wave animation stopped at {}", self.move_distance);
        }
    }

    pub fn is_anim_running(&self) -> bool {
        self.animator.is_running()
    }

    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    /// Set the fill level, clamped to `0..=100`.
    pub fn set_percentage(&mut self, percentage: i32) {
        let clamped = percentage.clamp(0, 100) as u8;
        if clamped as i32 != percentage {
            trace!("percentage {} clamped to {}", percentage, clamped);
        }

        self.percentage = clamped;
        self.invalidate();
    }

    pub fn move_distance(&self) -> u32 {
        self.move_distance
    }

    /// Shift the wave horizontally. Distances wrap at one wave length.
    pub fn update_move_distance(&mut self, move_distance: u32) {
        self.move_distance = move_distance % self.style.wave_length.max(1);
        self.invalidate();
    }

    /// Request a redraw on the next tick.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    pub fn geometry(&self) -> WaveGeometry {
        WaveGeometry {
            size: self.bounds.size,
            percentage: self.percentage,
            wave_length: self.style.wave_length,
            wave_height: self.style.wave_height,
            move_distance: self.move_distance,
            shape: self.style.shape,
        }
    }

    /// The current wave outline, relative to the view's top left corner.
    pub fn wave_path(&self) -> WavePath {
        self.geometry().path()
    }

    /// Advance the animation to `now`. Returns `true` if the wave moved.
    pub fn advance(&mut self, now: Instant) -> bool {
        match self.animator.value_at(now) {
            Some(distance) if distance != self.move_distance => {
                self.update_move_distance(distance);
                true
            },
            _ => false,
        }
    }
}

impl<C: PixelColor> Drawable for WaveView<C> {
    type Color = C;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let mut target = target.clipped(&self.bounds);
        let offset = self.bounds.top_left;

        if let Some(background) = self.background {
            target.fill_solid(&self.bounds, background)?;
        }

        let geometry = self.geometry();
        let fill = self.style.fill_color;
        target.draw_iter(geometry.fill_points().map(|p| Pixel(p + offset, fill)))?;

        let stroke = PrimitiveStyle::with_stroke(self.style.stroke_color, self.style.stroke_width);
        match self.style.shape {
            Shape::Circle => geometry
                .clip_circle()
                .translate(offset)
                .into_styled(stroke)
                .draw(&mut target)?,
            Shape::Rectangle => self.bounds
                .into_styled(stroke)
                .draw(&mut target)?,
        }

        Ok(())
    }
}

impl Gui for WaveView<BinaryColor> {
    /// Whether the view was redrawn and the panel needs a refresh.
    type Output = bool;

    fn draw_init(&self, target: &mut FrameBuffer) {
        if self.background.is_none() {
            let Ok(()) = target.fill_solid(&self.bounds, BinaryColor::Off);
        }

        let Ok(()) = self.draw(target);
    }

    fn tick(&mut self, target: &mut FrameBuffer, ev: Event) -> bool {
        if let Event::Tick(now) = ev {
            self.advance(now);
        }

        if !self.dirty {
            return false;
        }

        self.draw_init(target);
        self.dirty = false;
        true
    }

    fn bounding_box(&self) -> Rectangle {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::Rgb888;
    use crate::element::wave::style::{StyleAttrs, binary_color};
    use crate::time::from_micros;

    fn style(shape: Shape) -> WaveStyle<BinaryColor> {
        StyleAttrs { shape: Some(shape as u8), ..StyleAttrs::default() }
            .resolve(1.0)
            .unwrap()
            .map_color(binary_color)
    }

    fn view(shape: Shape) -> WaveView<BinaryColor> {
        WaveView::new(Rectangle::new(Point::new(20, 30), Size::new(100, 100)), style(shape))
            .with_background(BinaryColor::Off)
    }

    #[rstest]
    #[case(150, 100)]
    #[case(100, 100)]
    #[case(42, 42)]
    #[case(0, 0)]
    #[case(-5, 0)]
    fn percentage_is_clamped(#[case] input: i32, #[case] expected: u8) {
        let mut v = view(Shape::Circle);
        v.set_percentage(input);
        assert_eq!(v.percentage(), expected);
    }

    #[test]
    fn starts_half_full_and_still() {
        let v = view(Shape::Circle);
        assert_eq!(v.percentage(), 50);
        assert_eq!(v.move_distance(), 0);
        assert!(!v.is_anim_running());
    }

    #[test]
    fn start_and_stop_toggle_running_state() {
        let mut v = view(Shape::Circle);
        v.stop_anim();
        assert!(!v.is_anim_running());

        v.start_anim();
        assert!(v.is_anim_running());

        v.stop_anim();
        assert!(!v.is_anim_running());
    }

    #[test]
    fn move_distance_wraps_at_wave_length() {
        let mut v = view(Shape::Rectangle);
        v.update_move_distance(23);
        assert_eq!(v.move_distance(), 3);
    }

    #[test]
    fn ticks_drive_the_wave_while_running() {
        let mut fb = FrameBuffer::new();
        let mut v = view(Shape::Circle);

        assert!(v.tick(&mut fb, Event::Tick(from_micros(0))));
        assert!(!v.tick(&mut fb, Event::Tick(from_micros(500_000))));

        v.start_anim();
        v.tick(&mut fb, Event::Tick(from_micros(1_000_000)));
        assert!(v.tick(&mut fb, Event::Tick(from_micros(1_500_000))));
        assert_eq!(v.move_distance(), 5);

        v.stop_anim();
        assert!(!v.tick(&mut fb, Event::Tick(from_micros(1_700_000))));
        assert_eq!(v.move_distance(), 5);
    }

    #[test]
    fn set_percentage_redraws_on_next_tick() {
        let mut fb = FrameBuffer::new();
        let mut v = view(Shape::Rectangle);
        v.tick(&mut fb, Event::RefreshFinished);
        let half = fb.count_on(v.bounding_box());

        v.set_percentage(90);
        assert!(v.needs_redraw());
        assert!(v.tick(&mut fb, Event::RefreshFinished));
        assert!(fb.count_on(v.bounding_box()) > half);
    }

    #[rstest]
    #[case(Shape::Rectangle)]
    #[case(Shape::Circle)]
    fn animated_frames_match_a_fresh_draw(#[case] shape: Shape) {
        let bounds = Rectangle::new(Point::new(20, 30), Size::new(100, 100));
        let mut v = WaveView::new(bounds, style(shape));
        let mut fb = FrameBuffer::new();

        v.start_anim();
        for i in 0..10 {
            v.tick(&mut fb, Event::Tick(from_micros(i * 100_000)));
        }
        assert_eq!(v.move_distance(), 9);

        let mut fresh = FrameBuffer::new();
        v.draw_init(&mut fresh);
        assert_eq!(fb.count_on(bounds), fresh.count_on(bounds));
        assert!(fb.as_bytes() == fresh.as_bytes(), "stale pixels left behind");
    }

    #[test]
    fn drawing_stays_inside_bounds() {
        let mut fb = FrameBuffer::new();
        let v = view(Shape::Rectangle);
        v.draw_init(&mut fb);

        let total = fb.count_on(fb.bounding_box());
        assert_eq!(fb.count_on(v.bounding_box()), total);
        assert!(total > 0);
    }

    #[test]
    fn circle_outline_and_fill() {
        let mut fb = FrameBuffer::new();
        let mut v = view(Shape::Circle);
        v.set_percentage(0);
        v.draw_init(&mut fb);

        // centre of an empty circle stays clear, the bottom of the ring is ink
        assert_eq!(fb.pixel(Point::new(70, 80)), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(Point::new(70, 129)), Some(BinaryColor::On));
        // corners of the bounds are outside the circle
        assert_eq!(fb.pixel(Point::new(21, 128)), Some(BinaryColor::Off));
    }

    #[test]
    fn draws_in_colour_targets() {
        let attrs = StyleAttrs {
            shape: Some(1),
            stroke_width: Some(0),
            ..StyleAttrs::default()
        };
        let style = attrs.resolve(1.0).unwrap().map_color(|argb| {
            Rgb888::new((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
        });
        let mut v = WaveView::new(Rectangle::new(Point::zero(), Size::new(64, 64)), style);
        v.set_percentage(100);

        let mut display = MockDisplay::<Rgb888>::new();
        v.draw(&mut display).unwrap();
        assert_eq!(display.get_pixel(Point::new(10, 10)), Some(Rgb888::new(0x88, 0x88, 0x88)));
        assert_eq!(display.get_pixel(Point::new(63, 63)), Some(Rgb888::new(0x88, 0x88, 0x88)));
    }
}
