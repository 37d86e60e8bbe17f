use core::fmt::{Display, Formatter};
use embedded_graphics::prelude::Point;
use crate::time::Instant;

/// An event delivered by the host to the elements on screen.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Touch(TouchEvent),
    RefreshFinished,
    /// A frame clock tick carrying the current time. Animated elements advance on these.
    Tick(Instant),
}

#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TouchEventType {
    Down,
    Up,
    Move,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TouchEvent {
    pub ev_type: TouchEventType,
    pub x: u16,
    pub y: u16,
}

impl TouchEvent {
    pub const fn new(ev_type: TouchEventType, x: u16, y: u16) -> Self {
        Self { ev_type, x, y }
    }

    pub fn eg_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

impl Display for TouchEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let ty = match self.ev_type {
            TouchEventType::Down => "Down",
            TouchEventType::Up => "Up",
            TouchEventType::Move => "Move",
        };
        write!(f, "{ty} @ ({}, {})", self.x, self.y)
    }
}
