//! Walks through the main editing operations of a `Sequence`, printing to
//! stdout. Failed operations show up on stderr through the diagnostics sink;
//! set `RUST_LOG` to tune them.

use linked_sequence::Sequence;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linked_sequence=warn,driver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut first = Sequence::from([1, 2, 3, 4, 5, 5, 1, 2, 3]);
    first.print(true, '\n');

    if let Ok(removed) = first.pop_value(&2) {
        tracing::info!(removed, "removed every 2");
    }
    first.print(true, '\n');

    let mut second = Sequence::from_iter(std::iter::repeat(2).take(first.len()));
    for (a, b) in first.iter_mut().zip(second.iter_mut()) {
        std::mem::swap(a, b);
    }
    first.print(true, '\n');
    second.print(false, '\n');

    // reported on stderr, the sequence is left untouched
    if second.push_at(second.len(), 0).is_err() {
        tracing::info!(len = second.len(), "push past the end was refused");
    }
}
