mod cli;
mod json;

pub use cli::print_summary;
pub use json::write_report;
