use embedded_graphics::prelude::*;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::{CornerRadii, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};
use crate::draw_target::FrameBuffer;
use crate::element::{Gui, DEFAULT_PRIMITIVE_STYLE, DEFAULT_TEXT_STYLE};
use crate::input::{Event, TouchEventType};
use crate::time::{Duration, Instant};

const CENTRE_STYLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// How long a press has to last to count as a long click.
const LONG_CLICK: Duration = Duration::from_ticks(500_000);

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct ButtonOutput {
    pub clicked: bool,
    pub long_clicked: bool,
    pub needs_refresh: bool,
}

#[derive(Debug)]
pub struct Button<'a> {
    pub rect: RoundedRectangle,
    pub label: &'a str,
    pub rect_style: PrimitiveStyle<BinaryColor>,
    pub char_style: MonoTextStyle<'a, BinaryColor>,
    pub touch_feedback: bool,
    pub touch_feedback_immediate_release: bool,

    now: Instant,
    click_begin_time: Option<Instant>,
    inverted: bool,
    should_uninvert: bool,
}

impl<'a> Button<'a> {
    pub fn new(rect: RoundedRectangle, label: &'a str, rect_style: PrimitiveStyle<BinaryColor>, char_style: MonoTextStyle<'a, BinaryColor>, touch_feedback: bool, touch_feedback_immediate_release: bool) -> Self {
        Self {
            rect,
            label,
            rect_style,
            char_style,
            touch_feedback,
            touch_feedback_immediate_release,
            now: Instant::from_ticks(0),
            click_begin_time: None,
            inverted: false,
            should_uninvert: false,
        }
    }

    pub fn with_default_style(rect: Rectangle, label: &'a str, touch_feedback_immediate_release: bool) -> Self {
        Self::new(
            RoundedRectangle::new(rect, CornerRadii::new(Size::new(3, 3))),
            label,
            DEFAULT_PRIMITIVE_STYLE,
            DEFAULT_TEXT_STYLE,
            true,
            touch_feedback_immediate_release,
        )
    }

    /// Whether the button is currently shown with inverted colours.
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn invert(&mut self) {
        self.rect_style.fill_color = self.rect_style.fill_color.map(|c| c.invert());
        self.char_style.text_color = self.char_style.text_color.map(|c| c.invert());
        self.inverted = !self.inverted;
    }

    fn release_feedback(&mut self, target: &mut FrameBuffer, ret: &mut ButtonOutput) {
        if !self.inverted {
            return;
        }

        if self.touch_feedback_immediate_release {
            self.invert();
            self.draw_init(target);
            ret.needs_refresh = true;
        } else {
            self.should_uninvert = true;
        }
    }
}

impl<'a> Gui for Button<'a> {
    type Output = ButtonOutput;

    fn draw_init(&self, target: &mut FrameBuffer) {
        let Ok(()) = self.rect
            .into_styled(self.rect_style)
            .draw(target);

        let Ok(_) = Text::with_text_style(
            self.label,
            self.rect.bounding_box().center(),
            self.char_style,
            CENTRE_STYLE
        )
            .draw(target);
    }

    fn tick(&mut self, target: &mut FrameBuffer, ev: Event) -> Self::Output {
        let mut ret = ButtonOutput::default();

        match ev {
            Event::Tick(now) => self.now = now,
            Event::Touch(ev) if self.rect.contains(ev.eg_point()) => {
                match (self.click_begin_time, ev.ev_type) {
                    (None, TouchEventType::Down) => {
                        self.click_begin_time = Some(self.now);
                        if self.touch_feedback {
                            self.invert();
                            self.draw_init(target);
                            ret.needs_refresh = true;
                        }
                    },
                    (Some(t), TouchEventType::Up) => {
                        self.click_begin_time = None;
                        self.release_feedback(target, &mut ret);

                        ret.clicked = true;
                        let held = self.now.checked_duration_since(t).unwrap_or(Duration::from_ticks(0));
                        if held > LONG_CLICK {
                            ret.long_clicked = true;
                        }
                    },
                    _ => {},
                }
            },
            Event::Touch(_) => {
                self.click_begin_time = None;
                self.release_feedback(target, &mut ret);
            },
            Event::RefreshFinished => {
                if self.should_uninvert {
                    self.should_uninvert = false;
                    self.invert();
                    self.draw_init(target);
                    ret.needs_refresh = true;
                }
            },
        }

        ret
    }

    fn bounding_box(&self) -> Rectangle {
        self.rect.into_styled(self.rect_style).bounding_box()
    }
}
