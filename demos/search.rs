//! Search Example - Debounced query writes
//!
//! This example demonstrates the debounced writer:
//! - Keystrokes schedule deferred URL writes, each replacing the last
//! - The event loop drives execution with poll()
//! - Only the final value navigates, so history stays clean
//! - Unbinding cancels an in-flight write
//!
//! Run with: cargo run -p spark-query --example search

use std::thread;
use std::time::Duration;

use spark_query::{bind_string, QueryStore};

fn main() {
    println!("=== spark-query Search Example ===\n");

    let store = QueryStore::new();
    let q = bind_string(&store, "q", "").with_debounce(Duration::from_millis(120));
    let debouncer = q.debouncer().unwrap();

    // Simulate a user typing with ~30ms between keystrokes
    println!("Typing \"iphone\"...\n");
    for text in ["i", "ip", "iph", "ipho", "iphon", "iphone"] {
        q.set_debounced(text);
        println!("  typed {:8}  url: ?{}", text, store.peek());
        thread::sleep(Duration::from_millis(30));
        debouncer.poll(); // never fires while keystrokes keep arriving
    }

    // Quiet period: the event loop keeps ticking until the write lands
    println!("\nUser stopped typing, waiting for the debounce...\n");
    while debouncer.is_pending() {
        thread::sleep(Duration::from_millis(10));
        if debouncer.poll() {
            println!("  write fired  url: ?{}", store.peek());
        }
    }

    println!(
        "\nHistory entries: {} (six keystrokes, one navigation)",
        store.history_len()
    );

    // A keystroke right before leaving the page never lands
    println!("\n--- Keystroke, then unbind before the delay elapses ---\n");
    q.set_debounced("iphone 15");
    println!("  pending write: {}", debouncer.is_pending());
    q.unbind();
    println!("  after unbind:  {}", debouncer.is_pending());
    println!("  url unchanged: ?{}", store.peek());

    println!("\n=== Debounced writes: last value wins, unmount cancels ===");
}
