//! Nested records example

use envbind::Bind;

#[derive(Debug, Default, Bind)]
struct Config {
    pub app_name: String,

    // Fields read DATABASE_HOST, DATABASE_PORT, ...
    pub database: Database,

    // Allocated even when no TLS_* variable is set
    pub tls: Option<Tls>,
}

#[derive(Debug, Default, Bind)]
struct Database {
    pub host: String,
    pub port: u16,
    pub pool: Pool,
}

#[derive(Debug, Default, Bind)]
struct Pool {
    // DATABASE_POOL_MAX_SIZE
    pub max_size: u32,
}

#[derive(Debug, Default, Bind)]
struct Tls {
    pub cert_path: String,
    pub verify: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_NAME", "nested-demo");
    std::env::set_var("DATABASE_HOST", "db.internal");
    std::env::set_var("DATABASE_PORT", "5432");
    std::env::set_var("DATABASE_POOL_MAX_SIZE", "16");
    std::env::set_var("TLS_VERIFY", "1");

    let config = Config::from_env()?;

    println!("Nested configuration:");
    println!("  App Name: {}", config.app_name);
    println!("  Database: {}:{}", config.database.host, config.database.port);
    println!("  Pool Size: {}", config.database.pool.max_size);
    println!("  TLS: {:?}", config.tls);

    Ok(())
}
