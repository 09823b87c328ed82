use marketplace_api::{config::AppConfig, db::create_orm_conn, migration::Migrator};
use sea_orm_migration::MigratorTrait;

/// Applies pending migrations. `migrate fresh` drops every table first.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;

    match std::env::args().nth(1).as_deref() {
        Some("fresh") => {
            Migrator::fresh(&orm).await?;
            println!("Schema recreated");
        }
        Some(other) => anyhow::bail!("unknown command: {other}"),
        None => {
            Migrator::up(&orm, None).await?;
            println!("Migrations applied");
        }
    }
    Ok(())
}
