//! Filters Example - URL-backed list filters
//!
//! This example demonstrates the binding lifecycle against a loaded URL:
//! - Declaring page/size/status parameters with defaults
//! - Default seeding for absent parameters
//! - Push-semantics writes and back/forward traversal
//! - Paginating a list from the URL state
//!
//! Run with: cargo run -p spark-query --example filters

use spark_query::{bind_array, bind_number, paginate, QueryMap, QueryStore};

fn main() {
    println!("=== spark-query Filters Example ===\n");

    // The URL the page was opened with
    let store = QueryStore::from_map(QueryMap::parse("?size=5&q=iphone"));
    println!("Loaded URL: ?{}", store.peek());

    // Declare the parameters this view cares about
    let page = bind_number(&store, "page", 1.0);
    let size = bind_number(&store, "size", 20.0);
    let status = bind_array(&store, "status", vec![]);

    // "page" was absent, so its default got seeded into the URL;
    // "size" was present and keeps the URL value over the default
    println!("After binding: ?{}", store.peek());
    println!("  page   = {}", page.get());
    println!("  size   = {}", size.get());
    println!("  status = {:?}\n", status.get());

    let orders: Vec<String> = (1..=12).map(|i| format!("order-{:02}", i)).collect();

    let window = paginate(&orders, page.get() as usize, size.get() as usize);
    println!(
        "Page {}/{} ({} orders total):",
        window.page, window.total_pages, window.total_items
    );
    for order in &window.items {
        println!("  {}", order);
    }

    // Flip to the next page and narrow the status filter
    println!("\n--- Set page=2 and status=[SENT, QUOTED] ---\n");
    page.set(2.0);
    status.set(vec!["SENT", "QUOTED"]);
    println!("URL: ?{}", store.peek());

    let window = paginate(&orders, page.get() as usize, size.get() as usize);
    println!("Page {}/{}:", window.page, window.total_pages);
    for order in &window.items {
        println!("  {}", order);
    }

    // The back button unwinds filter changes one at a time
    println!("\n--- Browser back, twice ---\n");
    store.back();
    println!("URL: ?{}  (status filter cleared)", store.peek());
    store.back();
    println!("URL: ?{}  (back on page 1)", store.peek());

    store.forward();
    println!("\nAfter forward: ?{}", store.peek());
    println!("History entries: {}", store.history_len());

    println!("\n=== The URL stays shareable at every step ===");
}
