use std::collections::HashMap;

use actix_web::web::Data;

use chat_relay::config::Config;
use chat_relay::AppState;

pub fn state_with(vars: &[(&str, &str)]) -> Data<AppState> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = Config::from_lookup(|key| vars.get(key).cloned()).expect("test config");
    Data::new(AppState::new(config).expect("test state"))
}

/// Builds the application the same way `main` does, minus the access log.
macro_rules! init_app {
    ($state:expr) => {{
        let state = $state;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(state.clone())
                .wrap(chat_relay::web::cors::build(&state.config.cors))
                .configure(chat_relay::web::routes::configure),
        )
        .await
    }};
}
