//! Demo data seeder
//!
//! Run with: cargo run --bin seed -- --members 6
//!
//! Inserts members, a ledger, goals, workshops and products through the
//! Postgres store so a fresh database shows a populated dashboard.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;

use shg_dashboard::domain::TransactionType;
use shg_dashboard::handlers::{
    CreateGoalCommand, CreateMemberCommand, CreateProductCommand, RecordTransactionCommand,
    ScheduleWorkshopCommand,
};
use shg_dashboard::{db, PgStore, ShgStore};

const VILLAGES: [&str; 3] = ["Rampur", "Sundarpur", "Kalyani"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let member_count: usize = args
        .iter()
        .position(|a| a == "--members")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(6);

    let database_url = std::env::var("DATABASE_URL")?;

    println!("Seeding {} members", member_count);
    println!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await?;

    if !db::check_schema(&pool).await? {
        anyhow::bail!("Database schema incomplete, apply migrations/ first");
    }

    let store = PgStore::new(pool.clone());

    let mut members = Vec::with_capacity(member_count);
    for i in 0..member_count {
        let command = CreateMemberCommand::new(
            format!("Member {}", i + 1),
            format!("98{:08}", i),
            VILLAGES[i % VILLAGES.len()],
        );
        let member = store.insert_member(command.into_draft()?).await?;

        // Totals are owned by the group's books, not derived from the ledger
        let savings = Decimal::from(500 * (i as i64 + 1));
        let loans = if i % 2 == 0 { Decimal::from(1000) } else { Decimal::ZERO };
        sqlx::query("UPDATE members SET total_savings = $1, active_loans = $2 WHERE id = $3")
            .bind(savings)
            .bind(loans)
            .bind(member.id)
            .execute(&pool)
            .await?;

        members.push(member);
    }

    let mut transaction_count = 0;
    for (i, member) in members.iter().enumerate() {
        let kind = TransactionType::ALL[i % TransactionType::ALL.len()];
        let command = RecordTransactionCommand::new(member.id, kind, format!("{}", 100 * (i + 1)))
            .with_description(format!("Monthly {}", kind.label()));
        store.insert_transaction(command.into_draft()?).await?;
        transaction_count += 1;
    }

    let deadline = (Utc::now() + Duration::days(90)).date_naive();
    let goal = CreateGoalCommand::new("Community hall", "50000")
        .with_current_amount("12500")
        .with_deadline(deadline.format("%Y-%m-%d").to_string());
    store.insert_goal(goal.into_draft()?).await?;

    let workshop_date = (Utc::now() + Duration::days(14)).date_naive();
    let workshop = ScheduleWorkshopCommand {
        location: Some("Panchayat office".to_string()),
        max_participants: Some("25".to_string()),
        ..ScheduleWorkshopCommand::new(
            "Bookkeeping basics",
            workshop_date.format("%Y-%m-%d").to_string(),
        )
    };
    store.insert_workshop(workshop.into_draft()?).await?;

    for (name, price, stock) in [("Pickle jar", "120", "40"), ("Handloom saree", "1450.50", "8")] {
        let product = CreateProductCommand::new(name, price, stock);
        store.insert_product(product.into_draft(None)?).await?;
    }

    println!("\n=== Seed Results ===");
    println!("Members: {}", members.len());
    println!("Transactions: {}", transaction_count);
    println!("Goals: 1, Workshops: 1, Products: 2");

    pool.close().await;
    Ok(())
}
