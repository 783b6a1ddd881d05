//! Carousel state shared by the testimonials slider, the career-level cards
//! and the image galleries.
//!
//! - `engine`: the synchronous state machine, driven by an explicit clock
//! - `driver`: a tokio task that fires the engine's autoplay timer

mod driver;
mod engine;

pub use driver::AutoplayDriver;
pub use engine::{CarouselConfig, CarouselEngine, CarouselState, Swipe, DRAG_THRESHOLD_PX};
