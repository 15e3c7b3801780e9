pub mod api;
pub mod auth;
pub mod event;
pub mod lyrics;
pub mod notify;
pub mod player;
pub mod ui;
pub mod util;
