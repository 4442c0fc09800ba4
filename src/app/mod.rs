mod controller;

pub use controller::MainController;
