use actix_web::{web, App, HttpServer};
use log::{error, info, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use rust_menu_scraper::app_state::AppState;
use rust_menu_scraper::config::Config;
use rust_menu_scraper::handlers;

const LOG_CONFIG_PATH: &str = "log4rs.yml";

/// Initialise log4rs from `log4rs.yml`, or log to stderr when it is missing
fn init_logging() {
    let Err(file_err) = log4rs::init_file(LOG_CONFIG_PATH, Default::default()) else {
        return;
    };

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l:<5} {t} - {m}{n}",
        )))
        .build();

    let fallback = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info));

    match fallback.map(log4rs::init_config) {
        Ok(Ok(_)) => log::warn!(
            "Could not load {} ({}), logging to stderr",
            LOG_CONFIG_PATH,
            file_err
        ),
        Ok(Err(e)) => eprintln!("Failed to install logger: {}", e),
        Err(e) => eprintln!("Invalid fallback logging config: {}", e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = Config::load().map_err(|e| {
        error!("Error loading configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;

    info!("Menu scraper configured:");
    info!("  Target URL: {}", config.menu.target_url);
    info!("  Wait timeout: {}s", config.menu.wait_timeout);
    info!("  Headless: {}", config.browser.headless);

    let addr = config.bind_addr();
    let data = web::Data::new(AppState::new(&config));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(handlers::configure)
    })
    .bind(&addr)?;

    info!("Listening on {}", addr);
    server.run().await
}
