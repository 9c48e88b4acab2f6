pub mod settings;
pub mod watcher;
