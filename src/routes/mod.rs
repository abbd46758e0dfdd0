use rocket::{State, get, http::Status, post, serde::json::Json};
use tracing::{debug, info};

use crate::{
    error::GameError,
    logic::Game,
    model::{CreateResponse, NewGameRequest, Pos},
    repository::SharedRepository,
    view::GameView,
};

/// Upper bound on custom board dimensions. The engine only rejects zero
/// dimensions, so the intake must keep request bodies from allocating
/// arbitrarily large boards.
const MAX_DIMENSION: usize = 100;

fn error_status(error: GameError) -> Status {
    match error {
        GameError::InvalidDimensions { .. } | GameError::CoordinateOutOfRange { .. } => {
            Status::BadRequest
        }
        GameError::InvalidOperation(_) => Status::Conflict,
    }
}

#[post("/games", data = "<request>")]
pub fn create_game(
    request: Json<NewGameRequest>,
    repository: &State<SharedRepository>,
) -> Result<Json<CreateResponse>, Status> {
    let game = match request.into_inner() {
        NewGameRequest::Preset { difficulty } => Game::from_difficulty(difficulty),
        NewGameRequest::Custom { rows, cols, mines } => {
            if rows > MAX_DIMENSION || cols > MAX_DIMENSION {
                return Err(Status::BadRequest);
            }
            Game::new(rows, cols, mines)
        }
    }
    .map_err(error_status)?;

    let view = GameView::from_game(&game);
    let id = repository.store(game);
    info!("created game {}", id);

    Ok(Json(CreateResponse { id, view }))
}

#[get("/games/<id>")]
pub async fn get_game(
    id: &str,
    repository: &State<SharedRepository>,
) -> Result<Json<GameView>, Status> {
    let stored = repository.get(id).map_err(|_| Status::NotFound)?;
    let mut stored = stored.lock().await;
    stored.touch();

    Ok(Json(GameView::from_game(&stored.game)))
}

#[post("/games/<id>/reveal", data = "<pos>")]
pub async fn reveal_square(
    id: &str,
    pos: Json<Pos>,
    repository: &State<SharedRepository>,
) -> Result<Json<GameView>, Status> {
    let stored = repository.get(id).map_err(|_| Status::NotFound)?;
    let mut stored = stored.lock().await;
    stored.touch();

    let opened = stored
        .game
        .open_square(pos.row, pos.col)
        .map_err(error_status)?;
    debug!(
        "reveal ({}, {}) on game {}: opened={}",
        pos.row, pos.col, id, opened
    );

    Ok(Json(GameView::from_game(&stored.game)))
}

#[post("/games/<id>/flag", data = "<pos>")]
pub async fn flag_square(
    id: &str,
    pos: Json<Pos>,
    repository: &State<SharedRepository>,
) -> Result<Json<GameView>, Status> {
    let stored = repository.get(id).map_err(|_| Status::NotFound)?;
    let mut stored = stored.lock().await;
    stored.touch();

    stored
        .game
        .toggle_flag(pos.row, pos.col)
        .map_err(error_status)?;

    Ok(Json(GameView::from_game(&stored.game)))
}
