#![forbid(unsafe_code)]

use poem::Route;
use poem_openapi::OpenApiService;

use crate::utils::config::Config;
use crate::v1::hello::HelloApi;

pub mod hello;

// From cargo.toml.
const HELLO_VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// hello_routes:
// ---------------------------------------------------------------------------
/** Build the route tree served by hello_server.  The only route is
 * GET /hello; every other path gets poem's default not found response.
 */
pub fn hello_routes(config: &Config) -> Route {
    let api_service =
        OpenApiService::new(HelloApi, config.title.as_str(), HELLO_VERSION.unwrap_or("unknown"))
            .server(config.server_url());

    Route::new().nest("/", api_service)
}
