pub mod app;
pub mod cli;
pub mod custom;
pub mod display;
pub mod error;
pub mod feedback;
pub mod handler;
pub mod history;
pub mod logic;
pub mod model;
pub mod parser;
pub mod resolve;
pub mod sort;
pub mod storage;
pub mod tasks;
pub mod util;

pub use app::run;
