pub mod animation;
pub mod cli;
pub mod desktop;
pub mod dispatch;
pub mod headless;
pub mod input;
pub mod layout;
pub mod overview;
pub mod utils;
