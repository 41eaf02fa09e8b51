pub mod csv_export;
pub mod csv_import;
pub mod file;
pub mod holidays;

pub use csv_export::{board_to_string, export_board};
pub use csv_import::{import_projects, import_projects_from_str};
pub use file::{load_projects, save_projects};
pub use holidays::{import_holidays_csv, import_holidays_from_bytes, import_holidays_from_str};
