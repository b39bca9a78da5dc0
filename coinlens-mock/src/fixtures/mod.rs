pub mod series;
pub mod spot;
