//! Turning reveal progress into frames: brush strokes, mask softening, compositing and the hand.

pub mod blur;
pub mod composite;
pub mod hand;
pub mod reveal;

pub use blur::MaskBlur;
pub use composite::{Backdrop, Compositor, jitter, overlay_hand};
pub use hand::{HandLibrary, HandSprite, HandStyle};
pub use reveal::{Brush, RevealMask};
