use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

mod cli;
mod config;
mod display;
mod engines;
mod error;
mod models;
mod routing;
mod widget;

use cli::{CliArgs, HELP, Line};
use engines::{ProductSearch, ProductsApi};
use models::SearchResultItem;
use routing::StdoutNavigator;
use widget::{SearchBox, SearchBoxSettings};

/// An empty query has no results and is never sent.
async fn lookup_once(
    engine: &dyn ProductSearch,
    query: &str,
    limit: usize,
) -> Result<Vec<SearchResultItem>> {
    if query.is_empty() {
        return Ok(vec![]);
    }

    Ok(engine.search(query, limit).await?)
}

async fn once(engine: &dyn ProductSearch, query: &str, limit: usize) -> Result<()> {
    let items = lookup_once(engine, query, limit).await?;

    if items.is_empty() {
        println!("no results");
    } else {
        println!("{}", display::routes(&items));
    }

    Ok(())
}

async fn interactive(engine: Arc<dyn ProductSearch>, settings: SearchBoxSettings) -> Result<()> {
    let handle = SearchBox::spawn(settings, engine, Arc::new(StdoutNavigator));

    let mut state = handle.subscribe();
    let printer = tokio::spawn(async move {
        while state.changed().await.is_ok() {
            let snapshot = state.borrow_and_update().clone();
            print!("{}", display::render(&snapshot));
        }
    });

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match Line::parse(&line) {
            Line::Input(query) => handle.input(query).await?,
            Line::Focus => handle.focus().await?,
            Line::Blur => handle.blur().await?,
            Line::PointerDown => handle.pointer_down().await?,
            Line::Select(index) => handle.select(index).await?,
            Line::Quit => break,
            Line::Unknown(line) => {
                log::warn!("Unknown command {:?}", line);
                println!("{}", HELP);
                print!("{}", display::render(&handle.snapshot()));
            }
        }
    }

    drop(handle);
    printer.await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = CliArgs::parse();
    let config = config::load_config(args.config.as_deref(), args.as_config())?;

    let settings = config.search_box_settings();
    let engine = Arc::new(ProductsApi::new(&config.api_settings())?);
    log::info!("Searching {}", config.api_settings().base_url);

    if let Some(query) = &args.once {
        return once(engine.as_ref(), query, settings.limit).await;
    }

    interactive(engine, settings).await?;

    log::info!("Search stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::SearchError;

    #[derive(Default)]
    struct CountingSearch(AtomicUsize);

    #[async_trait]
    impl ProductSearch for CountingSearch {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn search(
            &self,
            _query: &str,
            _limit: usize,
        ) -> Result<Vec<SearchResultItem>, SearchError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_empty_once_query_is_not_sent() {
        let engine = CountingSearch::default();

        assert!(lookup_once(&engine, "", 8).await.unwrap().is_empty());
        assert_eq!(engine.0.load(Ordering::SeqCst), 0);

        lookup_once(&engine, " ", 8).await.unwrap();
        assert_eq!(engine.0.load(Ordering::SeqCst), 1);
    }
}
