use actix_cors::Cors;

use crate::config::CorsConfig;

/// Exact origins from the allow-list, plus anything matching the preview
/// pattern. Credentials stay off unless explicitly enabled.
pub fn build(config: &CorsConfig) -> Cors {
    let origins = config.allowed_origins.clone();
    let pattern = config.origin_regex.clone();

    let cors = Cors::default()
        .allowed_origin_fn(move |origin, _head| {
            let Ok(origin) = origin.to_str() else {
                return false;
            };
            origins.iter().any(|allowed| allowed == origin)
                || pattern.as_ref().is_some_and(|re| re.is_match(origin))
        })
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if config.allow_credentials {
        cors.supports_credentials()
    } else {
        cors
    }
}
