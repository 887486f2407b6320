pub mod report;
pub mod scan;
pub mod workbook;

pub use scan::{ScanOptions, execute_scan};
pub use workbook::{SheetGrid, WorkbookError, load_grid};

const BANNER: &str = r#"
     _                _          _ _
  __| | ___  __ _  __| | ___ ___| | |
 / _` |/ _ \/ _` |/ _` |/ __/ _ \ | |
| (_| |  __/ (_| | (_| | (_|  __/ | |
 \__,_|\___|\__,_|\__,_|\___\___|_|_|
"#;

pub fn print_banner() {
    println!("{}", BANNER);
    println!(
        "  deadcell v{} - finds dead links hiding in your spreadsheets\n",
        env!("CARGO_PKG_VERSION")
    );
}
