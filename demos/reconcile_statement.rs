//! Basic statement reconciliation example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconcile_core::utils::MemoryLedgerStore;
use reconcile_core::{BankLineItem, Category, LedgerStore, LedgerTransaction, Reconciler};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏦 Reconcile Core - Statement Matching Example\n");

    // 1. Seed a ledger the way a bookkeeping app would have one
    println!("📒 Seeding the ledger...");
    let mut store = MemoryLedgerStore::new();
    let seeded = store
        .create_transactions(&[
            txn(2024, 3, 1, 45, Category::Expense, "Coffee Shop"),
            txn(2024, 3, 4, 120, Category::Expense, "Hydro bill"),
            txn(2024, 3, 12, 60, Category::Expense, "Grocery Mart"),
            txn(2024, 3, 15, 2500, Category::Income, "Salary"),
        ])
        .await?;

    for t in &seeded {
        println!("  ✓ #{} {} {} ({:?})", t.id, t.date, t.amount, t.category);
    }
    println!();

    // 2. Import a bank statement (normally from a CSV importer)
    println!("📥 Importing statement rows...\n");
    let statement = vec![
        BankLineItem::new(
            date(2024, 3, 1),
            "COFFEE SHOP",
            Some("CARD 1234"),
            BigDecimal::from(-45),
        ),
        BankLineItem::new(date(2024, 3, 10), "GROCERY MART", None, BigDecimal::from(-61)),
        BankLineItem::new(date(2024, 3, 20), "AIRLINE TICKETS", None, BigDecimal::from(-300)),
    ];

    // 3. Run the matcher
    let mut reconciler = Reconciler::new(store);
    let mut matches = reconciler.reconcile(&statement).await?;

    println!("🔍 Match results (needs attention first):");
    for m in &matches {
        println!(
            "  {} {} {} \"{}\"",
            m.match_type(),
            m.line_item().date,
            m.line_item().amount,
            m.line_item().description
        );
        if let Some(assigned) = m.assigned() {
            println!("      assigned to ledger #{} \"{}\"", assigned.id, assigned.description);
        }
        for candidate in m.possible_matches() {
            println!(
                "      candidate #{} \"{}\" (score {:.3})",
                candidate.transaction.id,
                candidate.transaction.description,
                candidate.total_score()
            );
        }
    }
    println!();

    // 4. Accept the top suggestion for the first partial match and push the
    //    bank's date/amount back to the ledger
    if let Some(partial) = matches
        .iter_mut()
        .find(|m| !m.possible_matches().is_empty())
    {
        let alignment = partial.accept_possible(0)?;
        let updated = reconciler.align(&alignment).await?;
        println!(
            "✅ Aligned ledger #{} to {} / {}",
            updated.id, updated.date, updated.amount
        );
    }

    // 5. Create a fresh ledger record from the unmatched row
    let unmatched: Vec<BankLineItem> = matches
        .iter()
        .filter(|m| m.assigned().is_none() && m.possible_matches().is_empty())
        .map(|m| m.line_item().clone())
        .collect();
    let created = reconciler.create_from_line_items(&unmatched).await?;
    for t in &created {
        println!("🆕 Created ledger #{} \"{}\" ({:?})", t.id, t.description, t.category);
    }

    println!("\n🎉 Example completed successfully!");
    Ok(())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(y: i32, m: u32, d: u32, amount: i64, category: Category, desc: &str) -> LedgerTransaction {
    LedgerTransaction::new(
        date(y, m, d),
        BigDecimal::from(amount),
        category,
        desc.to_string(),
    )
}
