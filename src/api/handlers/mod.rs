pub mod flow;
pub mod health;
pub mod process;
