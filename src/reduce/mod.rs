pub mod average;
pub mod day_reducer;
pub mod error;

pub use average::{average, Sample};
pub use day_reducer::{DayReducer, DAYTIME_HOURS};
pub use error::ReduceError;
