#![forbid(unsafe_code)]

use anyhow::Result;
use log::info;
use poem::listener::TcpListener;

// Hello Utilities
use cicd_hello::utils::config::{init_log, init_runtime_context, RuntimeCtx, HELLO_ARGS};
use cicd_hello::utils::errors::Errors;
use cicd_hello::v1::hello_routes;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "HelloServer"; // for poem logging

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize Server --------------
    // Announce ourselves.
    println!("Starting hello_server!");

    // Initialize the server.  Failures here end the process.
    let runtime_ctx = match hello_init() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{:#}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    // --------------- Main Loop Set Up ---------------
    let config = &runtime_ctx.parms.config;
    let addr = config.listen_addr();
    let app = hello_routes(config);

    // ------------------ Main Loop -------------------
    info!("{} listening on {}.", config.title, addr);
    poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run(app)
        .await
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// hello_init:
// ---------------------------------------------------------------------------
/** Initialize logging and read the input parameters. */
fn hello_init() -> Result<RuntimeCtx> {
    // Configure our log.
    init_log(HELLO_ARGS.log_config.as_deref())?;

    // Read input parameters.
    let runtime_ctx = init_runtime_context()?;
    info!("{}", Errors::InputParms(format!("{:#?}", runtime_ctx)));

    // Log build info.
    print_version_info();

    Ok(runtime_ctx)
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    // Log build info.
    info!("{}.", format!("\n*** Running HELLO={}, BRANCH={}, COMMIT={}, DIRTY={}, SRC_TS={}, RUSTC={}",
                        option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
                        env!("GIT_BRANCH"),
                        env!("GIT_COMMIT_SHORT"),
                        env!("GIT_DIRTY"),
                        env!("SOURCE_TIMESTAMP"),
                        env!("RUSTC_VERSION")),
    );
}
