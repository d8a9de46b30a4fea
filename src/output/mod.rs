pub mod csv;

pub use csv::{render_csv, write_csv};
