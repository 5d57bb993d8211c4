// Platform configuration module
pub mod config;

// Agent orchestration module
pub mod orchestration;

// CLI argument parsing module
pub mod cli;
