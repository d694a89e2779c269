// Adapters layer: transports that feed requests into the resolver.
// The lambda event adapter lives next to its config in `config::lambda`.

#[cfg(feature = "server")]
pub mod http;
