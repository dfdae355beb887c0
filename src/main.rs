//! Minimal terminal driver for a recommendation session.
//!
//! Thin presentation plumbing only: renders `UiEvent`s as lines and maps
//! typed commands onto controller calls. Everything interesting lives in the
//! library.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moviematch_session::{Config, HttpCatalog, SessionController, UiEvent, SELECTION_SIZE};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moviematch_session=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let catalog = Arc::new(HttpCatalog::new(
        &config.catalog_url,
        config.request_timeout(),
    )?);
    let (session, mut events) = SessionController::new(catalog, config.session_options());

    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            render(event);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Enter your four favorite movies.");
    let mut titles = Vec::with_capacity(SELECTION_SIZE);
    for number in 1..=SELECTION_SIZE {
        println!("movie {number}:");
        match lines.next_line().await? {
            Some(line) => titles.push(line),
            None => return Ok(()),
        }
    }
    let titles: [&str; SELECTION_SIZE] = [&titles[0], &titles[1], &titles[2], &titles[3]];
    let _ = session.submit(titles).await;

    println!("commands: another | like | dislike | watched | unwatched | watchlist | reset | quit");
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "another" => {
                let _ = session.request_another().await;
            }
            "like" => session.feedback(true),
            "dislike" => session.feedback(false),
            "watched" => session.mark_watched(true),
            "unwatched" => session.mark_watched(false),
            "watchlist" => {
                let _ = session.add_to_watchlist().await;
            }
            "reset" => session.reset(),
            "quit" | "exit" => break,
            "" => {}
            other => println!("unknown command: {other}"),
        }
    }

    Ok(())
}

fn render(event: UiEvent) {
    match event {
        UiEvent::Loading(true) => println!("... finding movies ..."),
        UiEvent::Loading(false) => {}
        UiEvent::Error { message } => println!("! {message}"),
        UiEvent::Notice { message } => println!("* {message}"),
        UiEvent::Recommendation { movie, genres } => {
            let year = movie
                .release_year()
                .map(|year| year.to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            println!();
            println!("=== {} ({year}) ===", movie.title);
            println!("rating: {:.1}/10", movie.vote_average);
            if !genres.is_empty() {
                let names: Vec<&str> = genres.iter().map(|genre| genre.name.as_str()).collect();
                println!("genres: {}", names.join(", "));
            }
            if let Some(overview) = &movie.overview {
                println!("{overview}");
            }
        }
        UiEvent::Suggestions { slot, movies } => {
            let titles: Vec<&str> = movies.iter().map(|movie| movie.title.as_str()).collect();
            println!("({slot}: {})", titles.join(" | "));
        }
        UiEvent::SuggestionsHidden { .. } => {}
        UiEvent::FeedbackChanged(_) => {}
        UiEvent::SessionReset => println!("(session cleared)"),
    }
}
