pub mod refresh;
pub mod series;
pub mod spot;

pub mod util;
