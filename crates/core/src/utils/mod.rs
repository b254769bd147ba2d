pub mod hours;

pub use hours::{hours_from_tenths, minutes_to_hours, ratio_to_hours, tenths_of_hour};
