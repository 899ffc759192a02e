pub mod info;
pub mod line_style;
pub mod pattern;
pub mod player;
pub mod scheduler;
