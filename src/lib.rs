pub mod app;
pub mod config;
pub mod game;
pub mod input;
pub mod render;
pub mod traits;
pub mod util;

#[cfg(test)]
mod test_utils;
