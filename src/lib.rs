// Singlestat math panel - Reduces data frames to one formatted, colored value
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
