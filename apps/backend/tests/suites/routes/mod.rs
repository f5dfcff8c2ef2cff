pub mod handler_play;
pub mod health;
