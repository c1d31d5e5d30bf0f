mod exports;
mod progress;
mod styling;
mod tables;

pub use exports::export_variables;
pub use progress::CollectProgress;
