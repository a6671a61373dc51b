use actix_web::dev::Server;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::net::TcpListener;

use crate::logger::LoggerMiddleware;
use crate::middleware::SessionMiddleware;
use crate::routes::{get_current_user, health_check, list_users, login, register};
use crate::state::AppState;

pub fn run(listener: TcpListener, state: AppState) -> Result<Server, std::io::Error> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            // Global middleware
            .wrap(Logger::default())
            .wrap(LoggerMiddleware)

            // Shared state
            .app_data(state.clone())

            // Public routes
            .route("/health_check", web::get().to(health_check))
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/users", web::get().to(list_users))

            // Protected routes (require an active session)
            .service(
                web::resource("/users/me")
                    .wrap(SessionMiddleware::new(state.clone()))
                    .route(web::get().to(get_current_user)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
