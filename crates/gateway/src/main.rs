//! Course Portal - HTTP gateway and admin CLI.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain::{CreateUser, Role};
use gateway_lib::config::GatewayConfig;

#[derive(Parser)]
#[command(name = "course-portal")]
#[command(about = "Course portal API server and admin tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Overrides GATEWAY_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides GATEWAY_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create an account, e.g. the first admin
    CreateUser {
        #[arg(long)]
        email: String,
        #[arg(long, env = "COURSE_PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        name: String,
        /// admin, teacher or student
        #[arg(long, default_value = "student")]
        role: Role,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = GatewayConfig::from_env();

    match cli.command {
        Commands::Serve { host, port } => {
            gateway_lib::run(config.with_bind(host, port)).await?;
        }
        Commands::CreateUser {
            email,
            password,
            name,
            role,
        } => {
            let user = gateway_lib::create_account(
                &config,
                CreateUser {
                    email,
                    password,
                    name,
                    role,
                },
            )
            .await?;
            println!("Created {} account {} (id {})", user.role, user.email, user.id);
        }
    }

    Ok(())
}
