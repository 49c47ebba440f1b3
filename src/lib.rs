pub mod board;
pub mod gui;
pub mod layout;
pub mod persistence;
