pub mod events;
pub mod game;
pub mod model;
