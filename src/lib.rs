use rocket::{Build, Rocket, routes};

pub mod cleanup;
pub mod cors;
pub mod data;
pub mod error;
pub mod logic;
pub mod model;
pub mod repository;
pub mod routes;
pub mod view;

use repository::SharedRepository;
use routes::{create_game, flag_square, get_game, reveal_square};

/// Assembles the server around the given repository. The binary attaches
/// the cleanup fairing on top; tests mount this directly.
pub fn build_rocket(repository: SharedRepository) -> Rocket<Build> {
    rocket::build()
        .attach(cors::create_cors())
        .manage(repository)
        .mount("/", routes![create_game, get_game, reveal_square, flag_square])
}
