use std::future::Future;
use std::io::{IsTerminal, Write};
use std::time::Duration;

use colored::Colorize;
use weather_core::Backdrop;

use crate::render::gradient_bar;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn banner() -> String {
    let mut out = String::from("\n");
    out.push_str(&gradient_bar("", Backdrop::Default.gradient()));
    out.push_str(&gradient_bar("☀ ☁ 🌧   Weather App", Backdrop::Default.gradient()));
    out.push_str(&gradient_bar("", Backdrop::Default.gradient()));
    out.push_str(&format!("\n{}\n", "   • • •".dimmed()));
    out
}

/// Show the intro banner for `duration`, then clear it.
pub async fn show(duration: Duration) {
    let mut stdout = std::io::stdout();
    let interactive = stdout.is_terminal();

    let _ = write!(stdout, "{}", banner());
    let _ = stdout.flush();

    tokio::time::sleep(duration).await;

    if interactive {
        let _ = write!(stdout, "{CLEAR_SCREEN}");
        let _ = stdout.flush();
    }
}

/// Run `work` behind the splash. Resolves once both the splash timer and
/// the work have finished.
pub async fn behind<F: Future>(duration: Option<Duration>, work: F) -> F::Output {
    match duration {
        Some(duration) => {
            let ((), out) = tokio::join!(show(duration), work);
            out
        }
        None => work.await,
    }
}
