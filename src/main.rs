use actix_web::middleware::Logger;
use actix_web::{web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use chat_relay::config::Config;
use chat_relay::web::{cors, routes};
use chat_relay::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting chat relay");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let app_state = match AppState::new(config) {
        Ok(state) => Data::new(state),
        Err(e) => {
            error!("Failed to initialize provider client: {:#}", e);
            std::process::exit(1);
        }
    };

    let bind = (app_state.config.host.clone(), app_state.config.port);
    info!("Listening on {}:{}", bind.0, bind.1);

    // Start web server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(cors::build(&app_state.config.cors))
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
