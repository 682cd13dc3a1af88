//! Time-varying parameters: clocks, animated values and their sampled renderings.

pub mod animated;
pub mod clock;
pub mod ops;
pub mod sampled;

pub use animated::{Animated, MAX_SAMPLE_INTERVALS};
pub use clock::Clock;
pub use sampled::{Key, Sampled};
