use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use passeador::cli::{clear_passeadores, create_passeador, run_migrations, seed_passeadores};
use passeador_config::{DatabaseConfig, PasswordConfig, StorageBackend};
use passeador_core::AppError;
use passeador_db::{init_db_pool, init_store};
use passeador_models::PasseadorDto;

#[derive(Parser)]
#[command(name = "passeador-cli")]
#[command(about = "Passeador CLI - Administrative tools for the Passeador API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Register a new passeador account
    Create {
        #[arg(short = 'n', long)]
        nome: String,

        #[arg(short = 'e', long)]
        email: String,

        #[arg(short = 's', long)]
        senha: String,

        #[arg(short = 'd', long)]
        disponibilidade: String,
    },
    /// Seed the store with fake passeadores
    Seed {
        /// Number of accounts to create
        #[arg(short = 'c', long, default_value = "20")]
        count: usize,
    },
    /// Delete every passeador account
    Clear,
}

fn report(err: AppError) -> anyhow::Error {
    match err.fields {
        Some(fields) => {
            let details: Vec<String> = fields
                .iter()
                .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
                .collect();
            anyhow::anyhow!("{} ({})", err.error, details.join("; "))
        }
        None => err.error,
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let database_config = DatabaseConfig::from_env();

    if let Commands::Migrate = cli.command {
        if database_config.backend != StorageBackend::Postgres {
            anyhow::bail!("migrate requires STORAGE_BACKEND=postgres");
        }
        let pool = init_db_pool(&database_config).await?;
        run_migrations(&pool).await?;
        println!("✅ Migrations applied");
        return Ok(());
    }

    let store = init_store(&database_config).await?;

    match cli.command {
        Commands::Migrate => {}
        Commands::Create {
            nome,
            email,
            senha,
            disponibilidade,
        } => {
            let dto = PasseadorDto {
                nome: nome.into(),
                email: email.into(),
                senha: senha.into(),
                disponibilidade: disponibilidade.into(),
            };
            let created = create_passeador(store.as_ref(), dto, &PasswordConfig::from_env())
                .await
                .map_err(report)?;
            println!("✅ Passeador created successfully!");
            println!("   Id: {}", created.id);
            println!("   Email: {}", created.email);
        }
        Commands::Seed { count } => {
            seed_passeadores(store.as_ref(), count)
                .await
                .map_err(report)?;
        }
        Commands::Clear => {
            clear_passeadores(store.as_ref()).await.map_err(report)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}
