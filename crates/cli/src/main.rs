//! `flowdeck` -- terminal view of the project board.
//!
//! Loads the signed-in user's projects through the store and prints
//! them in display order with per-task status markers and a stats
//! line. `--archived` prints the archived list instead.
//!
//! # Environment variables
//!
//! | Variable                | Required | Default                     | Description                     |
//! |-------------------------|----------|-----------------------------|---------------------------------|
//! | `FLOWDECK_API_URL`      | no       | `http://localhost:3001/api` | Tracker backend base URL        |
//! | `FLOWDECK_TOKEN`        | no       | --                          | Bearer token for the session    |
//! | `FLOWDECK_TIMEOUT_SECS` | no       | `30`                        | Per-request timeout in seconds  |

use std::sync::Arc;

use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flowdeck_core::board::BoardStats;
use flowdeck_core::dates;
use flowdeck_core::project::Project;
use flowdeck_core::task::TaskStatus;
use flowdeck_remote::{HttpTrackerApi, RemoteConfig};
use flowdeck_store::ProjectStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flowdeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RemoteConfig::from_env();
    let api = match HttpTrackerApi::new(&config) {
        Ok(api) => Arc::new(api),
        Err(err) => {
            tracing::error!(error = %err, "could not build the HTTP client");
            std::process::exit(1);
        }
    };
    let store = ProjectStore::new(api);

    if let Err(err) = store.load().await {
        if err.is_unauthorized() {
            tracing::error!("session rejected -- set FLOWDECK_TOKEN to a valid token");
        } else {
            tracing::error!(error = %err, "could not load projects");
        }
        std::process::exit(1);
    }

    if std::env::args().any(|arg| arg == "--archived") {
        if let Err(err) = store.load_archived().await {
            tracing::error!(error = %err, "could not load archived projects");
            std::process::exit(1);
        }
        print_archived(&store.archived().await);
        return;
    }

    let today = dates::today_local();
    print_board(&store.sorted_projects().await, today);
    print_stats(store.stats().await);
}

fn status_marker(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Done => "x",
        TaskStatus::Overdue => "!",
        TaskStatus::DueSoon => "~",
        TaskStatus::OnTrack => " ",
    }
}

fn print_board(projects: &[Project], today: NaiveDate) {
    if projects.is_empty() {
        println!("No projects yet.");
        return;
    }
    for project in projects {
        println!("{}  {}", project.name, project.color);
        for task in &project.tasks {
            let mut line = format!("  [{}] {}", status_marker(task.status(today)), task.title);
            if let Some(due) = task.due_date {
                line.push_str(&format!("  due {due}"));
            }
            if let Some(who) = &task.responsible {
                line.push_str(&format!("  ({who})"));
            }
            println!("{line}");
        }
        if !project.notes.is_empty() {
            println!("  -- {} note(s)", project.notes.len());
        }
    }
}

fn print_archived(projects: &[Project]) {
    if projects.is_empty() {
        println!("No archived projects.");
        return;
    }
    println!("Archived projects:");
    for project in projects {
        println!("  {}  ({} tasks)", project.name, project.tasks.len());
    }
}

fn print_stats(stats: BoardStats) {
    println!(
        "{} project(s) -- {} task(s): {} overdue, {} due soon, {} done",
        stats.projects, stats.total, stats.overdue, stats.due_soon, stats.done
    );
}
