//! Basic usage example

use envbind::Bind;

#[derive(Debug, Bind)]
struct Config {
    // Loaded from DATABASE_URL environment variable
    pub database_url: String,

    // Loaded from SERVER_ADDR, keeps the preset value when unset
    pub server_addr: String,

    // Numeric type
    pub max_connections: u32,

    // Boolean type
    pub debug_mode: bool,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("MAX_CONNECTIONS", "32");

    // Defaults live in the struct itself
    let mut config = Config {
        database_url: String::new(),
        server_addr: "127.0.0.1:8080".to_string(),
        max_connections: 10,
        debug_mode: false,
    };
    envbind::bind(&mut config)?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);

    Ok(())
}
