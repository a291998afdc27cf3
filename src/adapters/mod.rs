// Adapters layer: concrete implementations of the domain ports.

pub mod filesystem;

pub use filesystem::LocalFilesystem;
