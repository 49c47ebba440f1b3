pub mod circular;
