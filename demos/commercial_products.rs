//! Commercial Products Example - a simulated feed driving the table
//!
//! This example walks through what a host does:
//! - Binding the products feed in a FeedHub
//! - Mounting the view and drawing on every render
//! - Pushing JSON snapshots and flipping menu options
//!
//! Run with: cargo run --example commercial_products

use std::io::{self, Write};

use commerce_view::{
    empty_snapshot, ColumnGroup, CommercialView, FeedHub, FilterMode, Snapshot, SortKey,
    TableRenderer, ViewConfig, ViewOutput, WordFormatter,
};

const FIRST_PUSH: &str = r#"[
    {"ResourceName": "Food", "Demand": 12, "Building": 2, "Free": 4, "Companies": 6,
     "SvcPercent": 35, "CapPerCompany": 120, "CapPercent": 180, "Workers": 48, "WrkPercent": 96, "TaxFactor": 1.2},
    {"ResourceName": "Oil", "Demand": -4, "Building": 0, "Free": 0, "Companies": 2,
     "SvcPercent": 70, "CapPerCompany": 300, "CapPercent": 240, "Workers": 10, "WrkPercent": 60, "TaxFactor": -0.4},
    {"ResourceName": "NoResource", "Demand": 99},
    {"ResourceName": "Furniture", "Demand": 3, "Building": 1, "Free": 1, "Companies": 3,
     "SvcPercent": 20, "CapPerCompany": 80, "CapPercent": 90, "Workers": 22, "WrkPercent": 91, "TaxFactor": 0.8}
]"#;

const SECOND_PUSH: &str = r#"[
    {"ResourceName": "Food", "Demand": 2, "Building": 1, "Free": 1, "Companies": 7,
     "SvcPercent": 40, "CapPerCompany": 110, "CapPercent": 150, "Workers": 55, "WrkPercent": 98, "TaxFactor": 1.1},
    {"ResourceName": "Ore", "Demand": -9, "Building": 0, "Free": 3, "Companies": 1,
     "SvcPercent": 10, "CapPerCompany": 50, "CapPercent": 40, "Workers": 4, "WrkPercent": 40, "TaxFactor": -1.5}
]"#;

fn draw(renderer: TableRenderer, title: &str, output: &ViewOutput) {
    let mut stdout = io::stdout().lock();
    if let Err(err) = writeln!(stdout, "--- {title} ---") {
        eprintln!("render failed: {err}");
    }
    if let Err(err) = renderer.write_ansi(&mut stdout, output) {
        eprintln!("render failed: {err}");
    }
}

fn main() -> commerce_view::Result<()> {
    println!("=== commerce-view Commercial Products Example ===\n");

    let width = crossterm::terminal::size().map_or(100, |(cols, _)| cols);
    let renderer = TableRenderer::new(width);

    let config = ViewConfig::default();
    let mut hub = FeedHub::new();
    let products = hub.bind::<Snapshot>(config.feed.clone(), empty_snapshot())?;

    let view = CommercialView::mount(&products, &config, WordFormatter);
    draw(renderer, view.title(), &view.output());

    let title = view.title().to_string();
    let _render = view.on_render(move |output| draw(renderer, &title, output));

    println!("\n[push 1]");
    hub.publish_json(&config.feed, FIRST_PUSH)?;

    println!("\n[sort by demand]");
    view.set_sort_key(SortKey::Demand);

    println!("\n[negative demand only]");
    view.set_filter_mode(FilterMode::Negative);

    println!("\n[hide capacity, push 2]");
    view.toggle_column(ColumnGroup::Capacity);
    hub.publish_json(&config.feed, SECOND_PUSH)?;

    println!("\n[malformed push is rejected]");
    if let Err(err) = hub.publish_json(&config.feed, "{\"oops\": true}") {
        println!("rejected: {err}");
    }

    println!("\nMenus:");
    for menu in view.menus() {
        let ticked: Vec<&str> = menu
            .options
            .iter()
            .filter(|o| o.is_checked)
            .map(|o| o.label)
            .collect();
        println!("  {}: {}", menu.title, ticked.join(", "));
    }

    view.unmount();
    println!("\nUnmounted.");
    Ok(())
}
