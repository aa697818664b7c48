// Domain layer - Plain data shared by every other layer
pub mod frame;
pub mod geometry;
pub mod options;
pub mod panel;
pub mod series;
pub mod thresholds;
