// Adapters layer: concrete implementations of the domain ports for external systems.
// Local filesystem storage lives with the CLI configuration in `config::cli`.

pub mod renderer;
