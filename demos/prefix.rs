//! Example demonstrating a root prefix

use envbind::{Bind, Binder};

#[derive(Debug, Default, Bind)]
struct Config {
    // Environment variables will be prefixed: MYAPP_DATABASE_URL, MYAPP_API_KEY, etc.
    pub database_url: String,
    pub api_key: String,
    pub port: u16,
    pub debug: bool,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables with prefix
    std::env::set_var("MYAPP_DATABASE_URL", "postgres://localhost/db");
    std::env::set_var("MYAPP_API_KEY", "secret-key-123");
    std::env::set_var("MYAPP_PORT", "3000");

    let mut config = Config {
        port: 8080,
        ..Default::default()
    };
    Binder::new().prefix("MYAPP").bind(&mut config)?;

    println!("Configuration with prefix 'MYAPP':");
    println!("  Database URL: {}", config.database_url);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);

    Ok(())
}
