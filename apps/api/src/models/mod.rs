pub mod taxonomy;
pub mod weights;
