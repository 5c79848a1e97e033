mod data;
mod engine;
mod restrictions;
mod results;
mod scorers;

pub use data::WordBank;
pub use data::WordStats;
pub use data::LETTER_COUNT_CAP;
pub use engine::*;
pub use restrictions::*;
pub use results::*;
pub use scorers::*;
