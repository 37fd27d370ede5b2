// Adapters layer: concrete implementations of the domain ports (blob store, remote documents).

pub mod gist;
pub mod store;
