pub mod export;
pub mod settings;
