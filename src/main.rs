//! Strata - Server Binary
//! Process bootstrap: logging, configuration from the environment, engine
//! open (manifest recovery), and the HTTP listener.

use strata::config::Config;
use strata::engine::store::Store;
use strata::http;

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut config = Config::default();
    if let Ok(dir) = std::env::var("STRATA_DATA_DIR") {
        config.data_dir = dir.into();
    }
    if let Ok(addr) = std::env::var("STRATA_LISTEN_ADDR") {
        config.listen_addr = addr;
    }
    let listen_addr = config.listen_addr.clone();

    let store = match Store::open(config) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("[ERROR] Failed to open engine: {}", err);
            std::process::exit(1);
        }
    };

    let app = http::router(store);

    let listener = match tokio::net::TcpListener::bind(&listen_addr).await {
        Ok(l) => l,
        Err(err) => {
            eprintln!("[ERROR] Failed to bind {}: {}", listen_addr, err);
            std::process::exit(1);
        }
    };

    log::info!("listening on {}", listen_addr);
    if let Err(err) = axum::serve(listener, app).await {
        eprintln!("[ERROR] Server failed: {}", err);
        std::process::exit(1);
    }
}
