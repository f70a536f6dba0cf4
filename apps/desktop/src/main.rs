use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    image, BrowseEvent, BrowseHandle, BrowseSession, CatalogClient, CatalogResource,
    CategoryChoice,
};
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

mod config;

use config::{load_settings, normalize_base_url};

const FETCH_SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
struct Args {
    /// Catalog service base URL; overrides places.toml and PLACES_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,
    /// Free-text search applied to the place list.
    #[arg(long)]
    search: Option<String>,
    /// Category name to filter the place list by.
    #[arg(long)]
    category: Option<String>,
    /// Slug of a place to open in the detail view.
    #[arg(long)]
    slug: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let base_url = match &args.base_url {
        Some(raw) => normalize_base_url(raw),
        None => load_settings().base_url,
    };
    Url::parse(&base_url).with_context(|| format!("invalid base url: {base_url}"))?;

    let session = BrowseSession::new(CatalogClient::new(base_url.clone()));
    run_browse(&session, &base_url, args).await;
    session.shutdown().await;

    Ok(())
}

/// Drives one browse pass through the presentation seam: load, filter,
/// render, and optionally open a detail view. Renders only through
/// [`BrowseHandle`] operations; filtering itself stays in the controllers.
async fn run_browse(handle: &impl BrowseHandle, base_url: &str, args: Args) {
    let mut events = handle.subscribe_events();
    handle.load().await;

    // Wait for both collection fetches to settle, success or failure.
    let mut pending = 2;
    while pending > 0 {
        match timeout(FETCH_SETTLE_TIMEOUT, events.recv()).await {
            Ok(Ok(BrowseEvent::PlacesLoaded { count })) => {
                tracing::info!(count, "places loaded");
                pending -= 1;
            }
            Ok(Ok(BrowseEvent::CategoriesLoaded { count })) => {
                tracing::info!(count, "categories loaded");
                pending -= 1;
            }
            Ok(Ok(BrowseEvent::LoadFailed { resource, message })) => {
                tracing::error!(?resource, "catalog fetch failed: {message}");
                if resource == CatalogResource::Places || resource == CatalogResource::Categories {
                    pending -= 1;
                }
            }
            Ok(Ok(_)) => {}
            Ok(Err(_)) | Err(_) => break,
        }
    }

    if let Some(search) = args.search {
        handle.set_search_text(&search).await;
    }
    if let Some(category) = args.category {
        handle
            .choose_category(CategoryChoice::Category(category))
            .await;
    }

    if handle.is_loading().await {
        println!("Loading...");
        return;
    }

    let places = handle.filtered_places().await;
    if places.is_empty() {
        println!("No places available.");
    } else {
        for place in &places {
            let category = place
                .category
                .as_ref()
                .map(|c| c.name.as_str())
                .unwrap_or("-");
            let photo = image::resolve_photo_ref(&place.photo, base_url);
            println!("{} [{category}] {photo}", place.name);
        }
    }

    if let Some(slug) = args.slug {
        handle.open_detail(&slug).await;
        loop {
            match timeout(FETCH_SETTLE_TIMEOUT, events.recv()).await {
                Ok(Ok(BrowseEvent::DetailLoaded { .. })) => break,
                Ok(Ok(BrowseEvent::LoadFailed { resource, message }))
                    if resource == CatalogResource::PlaceDetail =>
                {
                    tracing::error!("detail lookup failed: {message}");
                    break;
                }
                Ok(Ok(_)) => {}
                Ok(Err(_)) | Err(_) => break,
            }
        }

        if let Some(place) = handle.selected_place().await {
            println!("--- {} ---", place.name);
            println!("{}", place.description);
            handle.close_detail().await;
        }
    }
}
