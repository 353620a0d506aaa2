use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use portfolio_backend::api::services::AppStartTime;
use portfolio_backend::api::services::routes;
use portfolio_backend::cli;
use portfolio_backend::config::{get_config, init_config};
use portfolio_backend::repository::Repository;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    dotenv().ok();
    init_config();

    let config = get_config();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    // CLI mode when arguments are present
    if std::env::args().len() > 1 {
        let cli = cli::Cli::parse();
        if let Err(e) = cli::run(cli).await {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    // Server mode
    let repository = match Repository::connect(&config.database.url, &config.database.backend).await
    {
        Ok(repository) => repository,
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    let cors_origin = config.server.cors_origin.clone();

    HttpServer::new(move || {
        let cors = if cors_origin.is_empty() {
            // Dev mode: any origin
            Cors::permissive()
        } else {
            Cors::default()
                .allowed_origin(&cors_origin)
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(repository.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
