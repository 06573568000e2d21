pub mod billing_cmd;
pub mod config_cmd;
pub mod installer_cmd;
pub mod output;
pub mod renderer;
