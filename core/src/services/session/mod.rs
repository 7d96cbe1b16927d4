//! Current-user session held across restarts

mod service;

pub use service::SessionHolder;
