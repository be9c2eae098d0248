use actix_web::web;

use crate::middleware::RequireBearer;

pub mod health;
pub mod notes;
pub mod ping;

/// Register the application routes. The `/api` scope is wrapped with the
/// bearer middleware, so every route inside it sees only verified requests;
/// `/health` stays public. Tests register the same tree.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health));

    cfg.service(
        web::scope("/api")
            .wrap(RequireBearer)
            .route("/ping", web::get().to(ping::ping))
            .service(
                web::resource("/notes")
                    .route(web::get().to(notes::list_notes))
                    .route(web::post().to(notes::append_note)),
            ),
    );
}
