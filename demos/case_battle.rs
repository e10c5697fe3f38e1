//! Two players open the same case three times; highest total value wins.
//!
//! Set RANDOM_ORG_API_KEY to draw from random.org, otherwise the draw
//! falls back to local randomness and says so.

use fairdraw::{RandomOrgClient, RandomOrgConfig, TicketTable, WeightedItem};

fn case_contents() -> Vec<WeightedItem> {
    vec![
        WeightedItem::new("Karambit | Doppler", 0.5)
            .with_value(1_450.0)
            .with_rarity("gold")
            .with_color("#e4ae39"),
        WeightedItem::new("AK-47 | Redline", 4.5)
            .with_value(38.0)
            .with_rarity("covert")
            .with_color("#eb4b4b"),
        WeightedItem::new("M4A1-S | Decimator", 15.0)
            .with_value(9.5)
            .with_rarity("classified")
            .with_color("#d32ce6"),
        WeightedItem::new("P250 | Sand Dune", 80.0)
            .with_value(0.05)
            .with_rarity("consumer")
            .with_color("#b0c3d9"),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let table = TicketTable::from_items(&case_contents())?;
    let client = RandomOrgClient::new(RandomOrgConfig::from_env())?;

    let players = ["alice", "bob"];
    let rounds = 3;
    let drawn = table.draw_batch(&client, players.len() * rounds).await?;
    println!("tickets drawn via {:?}\n", drawn.source);

    let mut totals = [0.0f64; 2];
    for (i, result) in drawn.value.iter().enumerate() {
        let player = i % players.len();
        totals[player] += result.range.value.unwrap_or(0.0);
        println!(
            "round {} {:>5}: {:<22} [{:>5}-{:>5}] ${:.2}",
            i / players.len() + 1,
            players[player],
            result.range.item,
            result.range.start_ticket,
            result.range.end_ticket,
            result.range.value.unwrap_or(0.0),
        );
    }

    println!();
    for (name, total) in players.iter().zip(totals) {
        println!("{name:>5}: ${total:.2}");
    }
    Ok(())
}
