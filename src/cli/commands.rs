//! Plain (non-TUI) subcommands.

use std::io::{Write, stdin, stdout};

use anyhow::{Context, Result, bail};

use crate::backend::auth::AuthClient;
use crate::context::AppContext;
use crate::core::models::{ParkingSpot, now_ms};
use crate::core::timer::format_remaining;

/// The spot views require a logged-in session. Demo mode runs
/// without one.
pub fn require_session(ctx: &AppContext) -> Result<()> {
    if ctx.config.demo || ctx.sessions.is_logged_in() {
        return Ok(());
    }
    bail!("Not logged in. Run 'parkctl login' first (or pass --demo true).")
}

/// Print the current spot table.
pub async fn list(ctx: &AppContext) -> Result<()> {
    let spots = ctx.backend.list().await.context("Failed to fetch spots")?;
    print_table(&spots);
    Ok(())
}

pub async fn reserve(ctx: &AppContext, spot: &str, name: &str, minutes: u32) -> Result<()> {
    require_session(ctx)?;
    let target = resolve_spot(ctx, spot).await?;

    let updated = ctx
        .backend
        .reserve(&target.id, name, minutes)
        .await
        .with_context(|| format!("Failed to reserve spot {}", target.number))?;

    let remaining = format_remaining(updated.reserved_until, now_ms()).unwrap_or_default();
    println!(
        "Reserved spot {} for {} ({})",
        updated.number,
        updated.reserved_by.as_deref().unwrap_or("Guest"),
        remaining
    );
    Ok(())
}

pub async fn occupy(ctx: &AppContext, spot: &str) -> Result<()> {
    require_session(ctx)?;
    let target = resolve_spot(ctx, spot).await?;

    let updated = ctx
        .backend
        .occupy(&target.id)
        .await
        .with_context(|| format!("Failed to occupy spot {}", target.number))?;

    println!("Spot {} is now occupied", updated.number);
    Ok(())
}

pub async fn free(ctx: &AppContext, spot: &str) -> Result<()> {
    require_session(ctx)?;
    let target = resolve_spot(ctx, spot).await?;

    let updated = ctx
        .backend
        .free(&target.id)
        .await
        .with_context(|| format!("Failed to free spot {}", target.number))?;

    println!("Spot {} is now free", updated.number);
    Ok(())
}

pub async fn login(ctx: &AppContext, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    let password = prompt("Password: ")?;

    let auth = AuthClient::new(ctx.config.auth_url.clone(), ctx.config.demo);
    let session = auth.login(&email, &password).await?;

    ctx.sessions.save(&session)?;
    println!("Logged in as {} <{}>", session.user.name, session.user.email);
    Ok(())
}

pub async fn signup(ctx: &AppContext, name: Option<String>, email: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => prompt("Name: ")?,
    };
    let email = match email {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    let password = prompt("Password: ")?;

    let auth = AuthClient::new(ctx.config.auth_url.clone(), ctx.config.demo);
    let session = auth.signup(&name, &email, &password).await?;

    ctx.sessions.save(&session)?;
    println!("Signed up as {} <{}>", session.user.name, session.user.email);
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.sessions.clear()?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.sessions.load()? {
        Some(session) => println!(
            "{} <{}> ({})",
            session.user.name, session.user.email, session.user.role
        ),
        None => println!("Not logged in"),
    }
    Ok(())
}

/// Accept a spot number or a raw id.
async fn resolve_spot(ctx: &AppContext, spot: &str) -> Result<ParkingSpot> {
    let spots = ctx.backend.list().await.context("Failed to fetch spots")?;

    let found = spots.into_iter().find(|candidate| {
        candidate.id == spot || spot.parse::<u32>().is_ok_and(|n| n == candidate.number)
    });

    match found {
        Some(found) => Ok(found),
        None => bail!("No spot matching '{}'", spot),
    }
}

fn print_table(spots: &[ParkingSpot]) {
    let now = now_ms();

    println!("{:<6} {:<10} {:<16} {}", "#", "Status", "Reserved By", "Remaining");
    for spot in spots {
        let remaining = format_remaining(spot.remaining_ms(now).and(spot.reserved_until), now)
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<6} {:<10} {:<16} {}",
            spot.number,
            spot.status.as_str(),
            spot.reserved_by.as_deref().unwrap_or("-"),
            remaining
        );
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    stdout().flush()?;

    let mut input = String::new();
    stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
