//! Demo page: a wave gauge with buttons to raise the level and toggle the animation.

#![cfg_attr(not(test), no_std)]

use core::fmt::Write;
use embedded_graphics::prelude::*;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use wave_gui::draw_target::FrameBuffer;
use wave_gui::element::button::Button;
use wave_gui::element::wave::{WaveStyle, WaveView};
use wave_gui::element::{Gui, DEFAULT_TEXT_STYLE};
use wave_gui::input::Event;

const TITLE_POS: Point = Point::new(10, 10);
const WAVE_TOP_LEFT: Point = Point::new(20, 45);
const WAVE_SIZE: Size = Size::new(200, 200);
const LABEL_POS: Point = Point::new(10, 260);
const LABEL_AREA: Rectangle = Rectangle::new(LABEL_POS, Size::new(220, 20));
const ADD_BUTTON: Rectangle = Rectangle::new(Point::new(10, 300), Size::new(105, 30));
const ANIM_BUTTON: Rectangle = Rectangle::new(Point::new(125, 300), Size::new(105, 30));

/// How much one press of the add button raises the level.
pub const PERCENTAGE_STEP: i32 = 10;

pub struct ExampleApp {
    wave: WaveView<BinaryColor>,
    add_button: Button<'static>,
    anim_button: Button<'static>,
}

impl ExampleApp {
    pub fn new(style: WaveStyle<BinaryColor>) -> Self {
        Self {
            wave: WaveView::new(Rectangle::new(WAVE_TOP_LEFT, WAVE_SIZE), style)
                .with_background(BinaryColor::Off),
            add_button: Button::with_default_style(ADD_BUTTON, "Add 10%", true),
            anim_button: Button::with_default_style(ANIM_BUTTON, "Animate", true),
        }
    }

    pub fn wave(&self) -> &WaveView<BinaryColor> {
        &self.wave
    }

    pub fn add_button_area(&self) -> Rectangle {
        ADD_BUTTON
    }

    pub fn anim_button_area(&self) -> Rectangle {
        ANIM_BUTTON
    }

    fn draw_label(&self, target: &mut FrameBuffer) {
        let Ok(()) = target.fill_solid(&LABEL_AREA, BinaryColor::Off);

        let mut s = String::<16>::new();
        let state = if self.wave.is_anim_running() { "moving" } else { "still" };
        let _ = write!(s, "{}% {}", self.wave.percentage(), state);
        let Ok(_) = Text::with_baseline(&s, LABEL_POS, DEFAULT_TEXT_STYLE, Baseline::Top)
            .draw(target);
    }
}

impl Gui for ExampleApp {
    /// Whether the panel needs a refresh.
    type Output = bool;

    fn draw_init(&self, target: &mut FrameBuffer) {
        let Ok(_) = Text::with_baseline("Wave View", TITLE_POS, DEFAULT_TEXT_STYLE, Baseline::Top)
            .draw(target);
        self.wave.draw_init(target);
        self.draw_label(target);
        self.add_button.draw_init(target);
        self.anim_button.draw_init(target);
    }

    fn tick(&mut self, target: &mut FrameBuffer, ev: Event) -> bool {
        let mut needs_refresh = false;
        let mut label_changed = false;

        let add = self.add_button.tick(target, ev);
        if add.clicked {
            self.wave.set_percentage(self.wave.percentage() as i32 + PERCENTAGE_STEP);
            label_changed = true;
        }
        needs_refresh |= add.needs_refresh;

        let anim = self.anim_button.tick(target, ev);
        if anim.clicked {
            if self.wave.is_anim_running() {
                self.wave.stop_anim();
            } else {
                self.wave.start_anim();
            }
            label_changed = true;
        }
        needs_refresh |= anim.needs_refresh;

        if label_changed {
            self.draw_label(target);
            needs_refresh = true;
        }

        needs_refresh |= self.wave.tick(target, ev);
        needs_refresh
    }

    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(wave_gui::DIM_X as u32, wave_gui::DIM_Y as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wave_gui::element::wave::binary_color;
    use wave_gui::element::wave::StyleAttrs;
    use wave_gui::input::{TouchEvent, TouchEventType};
    use wave_gui::time::from_micros;

    fn app() -> ExampleApp {
        let style = StyleAttrs::default().resolve(1.0).unwrap().map_color(binary_color);
        ExampleApp::new(style)
    }

    fn tap(app: &mut ExampleApp, fb: &mut FrameBuffer, area: Rectangle) -> bool {
        let c = area.center();
        let (x, y) = (c.x as u16, c.y as u16);
        let down = app.tick(fb, Event::Touch(TouchEvent::new(TouchEventType::Down, x, y)));
        let up = app.tick(fb, Event::Touch(TouchEvent::new(TouchEventType::Up, x, y)));
        down || up
    }

    #[rstest]
    #[case(1, 60)]
    #[case(3, 80)]
    #[case(5, 100)]
    #[case(8, 100)]
    fn add_button_raises_percentage(#[case] taps: usize, #[case] expected: u8) {
        let mut fb = FrameBuffer::new();
        let mut app = app();
        app.draw_init(&mut fb);

        for _ in 0..taps {
            assert!(tap(&mut app, &mut fb, ADD_BUTTON));
        }
        assert_eq!(app.wave().percentage(), expected);
    }

    #[test]
    fn anim_button_toggles_animation() {
        let mut fb = FrameBuffer::new();
        let mut app = app();
        app.draw_init(&mut fb);
        assert!(!app.wave().is_anim_running());

        tap(&mut app, &mut fb, ANIM_BUTTON);
        assert!(app.wave().is_anim_running());

        tap(&mut app, &mut fb, ANIM_BUTTON);
        assert!(!app.wave().is_anim_running());
    }

    #[test]
    fn ticks_move_the_wave_once_animating() {
        let mut fb = FrameBuffer::new();
        let mut app = app();
        app.draw_init(&mut fb);
        app.tick(&mut fb, Event::Tick(from_micros(0)));

        tap(&mut app, &mut fb, ANIM_BUTTON);
        app.tick(&mut fb, Event::Tick(from_micros(100_000)));
        assert!(app.tick(&mut fb, Event::Tick(from_micros(400_000))));
        assert_eq!(app.wave().move_distance(), 3);
    }

    #[test]
    fn taps_elsewhere_do_nothing() {
        let mut fb = FrameBuffer::new();
        let mut app = app();
        app.draw_init(&mut fb);
        app.tick(&mut fb, Event::RefreshFinished);

        let outside = Rectangle::new(Point::new(0, 380), Size::new(20, 20));
        assert!(!tap(&mut app, &mut fb, outside));
        assert_eq!(app.wave().percentage(), 50);
        assert!(!app.wave().is_anim_running());
    }
}
