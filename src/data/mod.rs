mod loader;

pub use loader::{load_dataset, load_dataset_from_reader};
