//! Ordered "try A, then B, then C" combinator used by the provider chains.

use std::future::Future;

/// Run `attempt` over `items` in order and return the first success.
///
/// Failures are handed to `on_error` with the item's label and never stop the
/// chain. Returns `None` when every attempt fails or `items` is empty.
pub async fn first_success<I, T, F, Fut, L, E>(
    items: I,
    label: L,
    mut attempt: F,
    mut on_error: E,
) -> Option<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
    L: Fn(&I::Item) -> String,
    E: FnMut(&str, &anyhow::Error),
{
    for item in items {
        let name = label(&item);
        match attempt(item).await {
            Ok(value) => return Some(value),
            Err(e) => on_error(&name, &e),
        }
    }
    None
}
