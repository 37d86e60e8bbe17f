//! The wave fill gauge: style resolution, outline geometry, animation and the view element.

pub mod animator;
pub mod path;
pub mod style;
pub mod view;

pub use animator::WaveAnimator;
pub use path::{PathCommand, WaveGeometry, WavePath};
pub use style::{Shape, StyleAttrs, StyleError, WaveStyle, binary_color};
pub use view::WaveView;
