// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

mod host;

use crate::host::WebHost;
use axum::{
    Router,
    routing::{get, post, put},
};
use clap::Parser;
use clap_derive::Parser;
use figment::{
    Figment,
    providers::{Format, Serialized, Yaml},
};
use serde_derive::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc, time::Duration};
use terrarium_common::auth::{TokenAuthority, load_keypair};
use terrarium_db::{DbConfig, WorldDb};
use tokio::{
    net::TcpListener,
    select,
    signal::unix::{SignalKind, signal},
};
use tracing::{error, info};

#[derive(Parser, Debug, Serialize, Deserialize)]
struct Args {
    #[arg(
        long,
        value_name = "listen-address",
        help = "HTTP listen address",
        default_value = "0.0.0.0:8080"
    )]
    listen_address: String,

    #[arg(
        long,
        value_name = "data-dir",
        help = "Directory for the world database",
        default_value = "terrarium-data"
    )]
    data_dir: PathBuf,

    #[arg(
        long,
        value_name = "public_key",
        help = "File containing the PEM encoded public key (shared with the daemon), used for authenticating session tokens",
        default_value = "public_key.pem"
    )]
    public_key: PathBuf,

    #[arg(
        long,
        value_name = "private_key",
        help = "File containing an openssh generated ed25519 format private key (shared with the daemon), used for signing session tokens",
        default_value = "private_key.pem"
    )]
    private_key: PathBuf,

    #[arg(
        long,
        help = "Maximum number of worlds one account may own at once",
        default_value = "5"
    )]
    max_worlds_per_owner: usize,

    #[arg(
        long,
        help = "Reject object placement outside the owning world's declared bounds",
        default_value = "false"
    )]
    enforce_world_bounds: bool,

    #[arg(long, help = "Session token lifetime in seconds", default_value = "86400")]
    token_ttl_seconds: u64,

    #[arg(long, help = "Enable debug logging", default_value = "false")]
    pub debug: bool,

    #[arg(long, help = "Yaml config file to use, overrides values in CLI args")]
    config_file: Option<String>,
}

fn mk_routes(web_host: WebHost) -> Router {
    Router::new()
        .route("/", get(host::health_handler))
        .route("/account/register", post(host::register_handler))
        .route("/account/login", post(host::login_handler))
        .route(
            "/environments",
            get(host::list_worlds_handler).post(host::create_world_handler),
        )
        .route(
            "/environments/{id}",
            get(host::get_world_handler)
                .put(host::update_world_handler)
                .delete(host::delete_world_handler),
        )
        .route(
            "/environments/{id}/objects",
            get(host::list_world_objects_handler),
        )
        .route("/objects", post(host::create_object_handler))
        .route(
            "/objects/{id}",
            put(host::update_object_handler).delete(host::delete_object_handler),
        )
        .route(
            "/objects/user/world/{world_id}",
            get(host::list_owner_objects_handler),
        )
        .with_state(web_host)
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), eyre::Error> {
    color_eyre::install()?;
    let cli_args = Args::parse();
    let config_file = cli_args.config_file.clone();
    let mut args_figment = Figment::new().merge(Serialized::defaults(cli_args));
    if let Some(config_file) = config_file {
        args_figment = args_figment.merge(Yaml::file(config_file));
    }
    let args = args_figment.extract::<Args>().unwrap();

    terrarium_common::tracing::init_tracing(args.debug).unwrap_or_else(|e| {
        eprintln!("Unable to configure logging: {e}");
        std::process::exit(1);
    });

    let mut hup_signal = match signal(SignalKind::hangup()) {
        Ok(signal) => signal,
        Err(e) => {
            error!("Unable to register HUP signal handler: {}", e);
            std::process::exit(1);
        }
    };
    let mut stop_signal = match signal(SignalKind::interrupt()) {
        Ok(signal) => signal,
        Err(e) => {
            error!("Unable to register STOP signal handler: {}", e);
            std::process::exit(1);
        }
    };

    let (private_key, public_key) = match load_keypair(&args.public_key, &args.private_key) {
        Ok(keypair) => keypair,
        Err(e) => {
            error!(
                "Unable to load keypair from public and private key files: {}",
                e
            );
            std::process::exit(1);
        }
    };
    let auth = Arc::new(TokenAuthority::new(
        private_key,
        public_key,
        Duration::from_secs(args.token_ttl_seconds),
    ));

    let db = match WorldDb::open(
        Some(&args.data_dir),
        DbConfig {
            max_worlds_per_owner: args.max_worlds_per_owner,
        },
    ) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Unable to open world database: {}", e);
            std::process::exit(1);
        }
    };

    let web_host = WebHost::new(
        db.clone(),
        db.clone(),
        db,
        auth,
        args.enforce_world_bounds,
    );
    let main_router = mk_routes(web_host);

    let listener = match TcpListener::bind(&args.listen_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(
                "Unable to bind listener at {}: {}",
                args.listen_address, e
            );
            std::process::exit(1);
        }
    };
    info!("Listening on {}", args.listen_address);

    select! {
        result = axum::serve(listener, main_router.into_make_service()) => {
            if let Err(e) = result {
                error!("HTTP server exited with error: {}", e);
            }
        },
        _ = hup_signal.recv() => {
            info!("HUP received, stopping...");
        },
        _ = stop_signal.recv() => {
            info!("STOP received, stopping...");
        }
    }
    info!("Done.");

    Ok(())
}
