mod color_sets;
mod driver;
mod memo;

pub use color_sets::ColorSetEngine;
pub use driver::{ColorCoding, ColorCodingOutcome, TrialHit, find_by_color_coding, trial_seed};
