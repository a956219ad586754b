//! Command handlers for the CLI.
//!
//! Every handler prints what it did and turns a failed envelope into an
//! error so the process exits non-zero.

use std::io::{BufRead, Write};

use pricedesk_core::{
    AccessToken, AppConfig, AuthenticationClient, CatalogSession, CatalogTransport, Credentials,
    Envelope, PricePolicy,
};
use rust_decimal::Decimal;

use crate::prompt;
use crate::render;

/// Category and count a command works on, after config defaults apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selection {
    pub(crate) category: String,
    pub(crate) count: usize,
}

/// Takes credentials from flags or environment, prompting for whatever is
/// missing.
pub(crate) fn resolve_credentials(
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<Credentials> {
    let username = prompt::value_or_prompt(username, "Username: ")?;
    let password = prompt::value_or_prompt(password, "Password: ")?;
    Ok(Credentials::new(username, password)?)
}

pub(crate) async fn authenticate<A: AuthenticationClient>(
    auth: &A,
    credentials: &Credentials,
    expires_in_mins: u32,
) -> anyhow::Result<AccessToken> {
    let envelope = pricedesk_core::login(auth, credentials, expires_in_mins).await;
    print_errors(&envelope);
    match envelope.data {
        Some(token) if envelope.success => {
            println!("{}", envelope.message);
            Ok(token)
        }
        _ => anyhow::bail!("{}", envelope.message),
    }
}

/// Prints the most expensive items of the selection.
pub(crate) async fn run_top<T: CatalogTransport, W: Write>(
    transport: &T,
    config: &AppConfig,
    token: AccessToken,
    selection: &Selection,
    out: &mut W,
) -> anyhow::Result<()> {
    let session = session(transport, config, token);
    let envelope = session.top_items(&selection.category, selection.count).await;
    print_errors(&envelope);
    let Some(items) = envelope.data.filter(|_| envelope.success) else {
        anyhow::bail!("{}", envelope.message);
    };

    writeln!(out, "{}", envelope.message)?;
    if !items.is_empty() {
        write!(out, "{}", render::items_table(&items))?;
    }
    Ok(())
}

/// Prints the selection, then raises its prices by `percentage` (read from
/// `input` when absent) and prints the result.
///
/// An out-of-policy percentage stops the command before any price is sent.
pub(crate) async fn run_raise<T: CatalogTransport, R: BufRead, W: Write>(
    transport: &T,
    config: &AppConfig,
    token: AccessToken,
    selection: &Selection,
    percentage: Option<Decimal>,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    let session = session(transport, config, token);
    let chosen = session.top_items(&selection.category, selection.count).await;
    print_errors(&chosen);
    let items = match chosen.data {
        Some(items) if chosen.success && !items.is_empty() => items,
        Some(_) => anyhow::bail!("no {} products to update", selection.category),
        None => anyhow::bail!("{}", chosen.message),
    };

    writeln!(out, "{}", chosen.message)?;
    write!(out, "{}", render::items_table(&items))?;

    let percentage = match percentage {
        Some(p) => p,
        None => prompt::prompt_decimal(input, out, "Percentage increase: ")?,
    };
    let policy = PricePolicy::with_max(config.max_percentage);
    let percentage = policy.check_percentage(percentage)?;

    let envelope = session.raise_prices(&items, percentage, Vec::new()).await;
    print_errors(&envelope);
    match envelope.data {
        Some(changes) if envelope.success && !changes.is_empty() => {
            writeln!(out, "{}", envelope.message)?;
            write!(out, "{}", render::changes_table(&changes))?;
            Ok(())
        }
        _ => anyhow::bail!("{}", envelope.message),
    }
}

fn session<'a, T: CatalogTransport>(
    transport: &'a T,
    config: &AppConfig,
    token: AccessToken,
) -> CatalogSession<'a, T> {
    CatalogSession::new(transport, token).with_page_size(config.page_size as usize)
}

fn print_errors<T>(envelope: &Envelope<T>) {
    for error in &envelope.errors {
        eprintln!("warning: {error}");
    }
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
