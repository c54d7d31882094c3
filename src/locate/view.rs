//! Terminal rendering of the map model.

use std::io::Write;

use tokio::sync::watch;
use tracing::warn;

use stacks::models::AdvisoryKind;
use stacks::{MapModel, SearchPhase};

/// Write the model every time it changes, until the controller goes away.
///
/// A change published just before the controller drops is still written.
/// Returns the writer once the channel closes.
pub async fn render_changes<W: Write>(mut rx: watch::Receiver<MapModel>, mut out: W) -> W {
    while rx.changed().await.is_ok() {
        let text = render(&rx.borrow_and_update());
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!("Failed to write results: {}", e);
            break;
        }
    }
    out
}

fn render(model: &MapModel) -> String {
    let mut out = String::new();

    if let Some(advisory) = &model.advisory {
        let marker = match advisory.kind {
            AdvisoryKind::Info => "i",
            AdvisoryKind::Warning => "!",
            AdvisoryKind::Error => "x",
        };
        out.push_str(&format!("[{}] {}\n", marker, advisory));
    }

    match model.phase {
        SearchPhase::Searching => {
            if let Some(viewport) = model.viewport {
                out.push_str(&format!("Searching around {}...\n", viewport.center));
            } else {
                out.push_str("Searching...\n");
            }
        }
        SearchPhase::Success => {
            for (n, place) in model.places.iter().enumerate() {
                out.push_str(&format!(
                    "{:>2}. {} [{}] {}\n    {}\n",
                    n + 1,
                    place.name,
                    if place.is_open_now { "Open" } else { "Closed" },
                    place.coordinate,
                    place.today_hours,
                ));
            }
        }
        SearchPhase::Idle => {
            if let Some(viewport) = model.viewport {
                out.push_str(&format!("Map centered on {}\n", viewport.center));
            }
        }
        SearchPhase::Failed => {}
    }

    out
}
