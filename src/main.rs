use std::sync::Arc;

use minefield_server::{
    build_rocket,
    cleanup::start_cleanup_task,
    repository::{GameRepository, SharedRepository},
};
use rocket::{
    Build, Rocket,
    fairing::{Fairing, Info, Kind},
};

struct CleanupFairing;

#[rocket::async_trait]
impl Fairing for CleanupFairing {
    fn info(&self) -> Info {
        Info {
            name: "Cleanup Task",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        if let Some(repository) = rocket.state::<SharedRepository>() {
            let repository_for_cleanup = Arc::clone(repository);
            tokio::spawn(async move {
                start_cleanup_task(repository_for_cleanup).await;
            });
        }
        Ok(rocket)
    }
}

#[rocket::launch]
fn rocket() -> Rocket<Build> {
    tracing_subscriber::fmt::init();

    let repository: SharedRepository = Arc::new(GameRepository::new());

    build_rocket(repository).attach(CleanupFairing)
}
