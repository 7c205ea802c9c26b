pub mod generate;
pub mod history;
pub mod presets;
