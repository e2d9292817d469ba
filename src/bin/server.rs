use clap::Parser;
use landing_hook::db::schema;
use landing_hook::landing::LandingService;
use landing_hook::notifications::senders::{MailSender, smtp::SmtpMailSender};
use landing_hook::notifications::service::NotificationService;
use landing_hook::server::config::ServerConfig;
use landing_hook::version::VERSION;
use landing_hook::web::{AppState, create_axum_router};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,
}

fn init_logging(log_dir: &str) {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily(log_dir, "landing.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI colors in file
        .json();

    // Log to stdout: human-readable format
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    // Default to `info,sea_orm=warn` level if RUST_LOG is not set.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sea_orm=warn,sqlx::query=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

fn build_notification_service(config: &ServerConfig) -> NotificationService {
    let Some(settings) = config.smtp_settings() else {
        warn!("SMTP_HOST or SMTP_SENDER not set. Lead notifications are disabled.");
        return NotificationService::disabled();
    };
    match SmtpMailSender::new(&settings) {
        Ok(sender) => {
            info!(host = %settings.host, port = settings.port, "SMTP notifications enabled.");
            let sender: Arc<dyn MailSender> = Arc::new(sender);
            NotificationService::new(Some(sender))
        }
        Err(e) => {
            error!(error = %e, "Invalid SMTP configuration. Lead notifications are disabled.");
            NotificationService::disabled()
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal.");
        return;
    }
    info!("Shutdown signal received.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Manually check for --version before full parsing to keep the original simple output.
    if std::env::args().any(|arg| arg == "--version") {
        println!("Landing hook version: {VERSION}");
        return Ok(());
    }

    let args = Args::parse();

    // --- Server Config Setup ---
    let server_config = match ServerConfig::load(args.config.as_deref()) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Failed to load server configuration: {e}");
            return Err(e.into());
        }
    };

    init_logging(&server_config.log_dir);
    info!("Starting landing hook, version: {}", VERSION);

    // --- Database Pool Setup ---
    let mut opt = ConnectOptions::new(server_config.database_url.to_owned());
    opt.max_connections(10);
    let db_pool: DatabaseConnection = Database::connect(opt).await?;

    if server_config.auto_migrate {
        schema::create_tables(&db_pool).await?;
        info!("Database tables ensured.");
    }

    // --- Landing Service Setup ---
    let notification_service = Arc::new(build_notification_service(&server_config));
    let landing_service = Arc::new(LandingService::new(db_pool.clone(), notification_service));

    let app_state = Arc::new(AppState {
        db_pool,
        landing_service,
        config: server_config.clone(),
    });
    let app = create_axum_router(app_state);

    // --- Listener ---
    let addr: SocketAddr = server_config.listen_addr.parse()?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4()?
    } else {
        tokio::net::TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.set_keepalive(true)?;
    socket.bind(addr)?;
    let listener = socket.listen(1024)?;
    info!(address = %addr, "HTTP server listening with TCP Keepalive");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}
