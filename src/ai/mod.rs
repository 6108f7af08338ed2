pub mod simple;
pub mod weighted;

pub use simple::run_auto_battle;
pub use weighted::{choose_computer_action, ActionWeights, ComputerChoice};
