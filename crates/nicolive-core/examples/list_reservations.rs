//! Lists the authenticated user's timeshift reservations.
//!
//! Usage: NICO_USER_SESSION=<cookie value> cargo run --example list_reservations

use nicolive_core::NicoliveScraper;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let session = std::env::var("NICO_USER_SESSION")
        .map_err(|_| "set NICO_USER_SESSION to your user_session cookie value")?;

    let scraper = NicoliveScraper::with_user_session(session)?;
    let reservations = scraper.timeshift_reservations().await?;

    println!("{} reservation(s)", reservations.len());
    for reservation in &reservations {
        let schedule = &reservation.program.schedule;
        println!(
            "- {} [{}] {} ({} - {})",
            reservation.program_id,
            schedule.status,
            reservation.program.title,
            schedule.begin_time,
            schedule.end_time,
        );
        println!("  {} / {}", reservation.social_group.name, reservation.watch_url());
    }

    Ok(())
}
