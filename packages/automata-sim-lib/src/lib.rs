pub mod automaton;
pub mod catalog;
pub mod config;
pub mod logger;
pub mod playback;
pub mod validation;
