pub mod config;
pub mod constants;
pub mod conversion;
pub mod env_state;
pub mod naming;
pub mod notifications;
pub mod simbad;
pub mod target_errors;
pub mod target_form;
pub mod target_panel;
pub mod viewer;

pub use target_errors::TargetError;
