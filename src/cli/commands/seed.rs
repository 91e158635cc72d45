use crate::config::Config;
use crate::db::Store;
use crate::seed;

pub async fn cmd_seed(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let report = seed::run(store, config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("✓ Database seeded");
    if let Some(admin) = &report.admin {
        println!("  Admin user:   {} ({})", admin.username, admin.email);
    }
    println!("  Customers:    {}", report.customers.len());
    for customer in &report.customers {
        println!("    #{} -> {}", customer.customer_id, customer.internal_id);
    }
    println!(
        "  Reservations: {}",
        report
            .reservations
            .iter()
            .map(|r| r.reservation_id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}
