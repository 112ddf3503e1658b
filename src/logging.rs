use ctor::ctor;
use tracing::Level;

/// Installs a `tracing-subscriber` `fmt` subscriber at crate load time when
/// `RPLUS_TREE_DEBUG` is set to a truthy value. Gated behind the
/// `setup_tracing` feature so a consumer embedding this crate alongside
/// another `tracing` user is never surprised by an eagerly-installed
/// global subscriber.
#[ctor]
fn set_debug_level() {
    let enabled = std::env::var("RPLUS_TREE_DEBUG")
        .map(|v| !(v == "0" || v == "false" || v.is_empty()))
        .unwrap_or(false);

    if enabled {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }
}
