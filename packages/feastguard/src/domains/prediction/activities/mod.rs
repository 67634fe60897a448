pub mod predict;

pub use predict::predict_step;
