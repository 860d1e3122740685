use std::time::Duration;

use colored::Colorize;
use route_pause::logging;
use route_pause::{HandlerResponse, MemoryHistory, PauseProps, RouterHost, RouterPause};

fn show(history: &MemoryHistory, label: &str) {
    println!(
        "{} {} {}",
        "→".dimmed(),
        label.bold(),
        format!("(at {}, {} entries)", history.location(), history.len()).cyan()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional file logging: ROUTE_PAUSE_LOG_DIR=/tmp/logs
    let _guard = match std::env::var("ROUTE_PAUSE_LOG_DIR") {
        Ok(dir) => Some(logging::init_file_logging(dir)?),
        Err(_) => {
            logging::init_logging()?;
            None
        }
    };

    tracing::info!("=== Route pause demo ===");

    let history = MemoryHistory::new("/editor");
    let pause = RouterPause::mount(
        history.clone(),
        PauseProps::new().with_named_handler("guard_editor", |nav, location, _action| {
            match location.path.as_str() {
                "/admin" => {
                    nav.replace("/login", None);
                    Ok(HandlerResponse::Allow)
                }
                "/checkout" => Ok(HandlerResponse::deferred(async {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(Some(true))
                })),
                "/danger" => Ok(HandlerResponse::Deny),
                _ => Ok(HandlerResponse::Pause),
            }
        }),
    );

    history.push("/danger".into(), None);
    show(&history, "push /danger (denied)");

    history.push("/settings".into(), None);
    show(&history, "push /settings (paused)");
    if let Some(location) = pause.paused_location() {
        println!("   paused on {}", location.to_string().yellow());
    }
    pause.resume();
    show(&history, "resume");

    history.push("/admin".into(), None);
    show(&history, "push /admin (redirected)");

    history.push("/checkout".into(), None);
    show(&history, "push /checkout (awaiting confirmation)");
    tokio::time::sleep(Duration::from_millis(100)).await;
    show(&history, "confirmation settled");

    history.go_back();
    show(&history, "back (paused)");
    pause.cancel();
    show(&history, "cancel");

    pause.push("/editor", None);
    show(&history, "push /editor (bypassed)");

    tracing::info!("=== Route pause demo done ===");
    Ok(())
}
