pub mod app_info;

pub use app_info::{AppInfo, Platform};
