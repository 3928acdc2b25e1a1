// Entry point and high-level CLI flow.
//
// - Option [1] loads the employee dataset (JSON array or CSV), printing
//   diagnostics.
// - Option [2] builds the aggregate report, previews each table and exports
//   the JSON/CSV bundle.
// - After generating the report, the user can go back to the menu or exit.

use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;

use pegawai_report::fields::FieldOverrides;
use pegawai_report::stats::{build_stats, BuildOptions};
use pegawai_report::types::RawRow;
use pegawai_report::{loader, output, util};

const DEFAULT_DATA_FILE: &str = "data_pegawai.csv";

// Simple in-memory app state so we only load the dataset once but can
// rebuild the report multiple times in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { rows: None }));

struct AppState {
    rows: Option<Vec<RawRow>>,
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the menu after generating the report.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Menu (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        let resp = buf.trim().to_uppercase();
        match resp.as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn data_path() -> String {
    std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())
}

/// Handle option [1]: load the dataset file into `APP_STATE`.
fn handle_load() {
    let path = data_path();
    match loader::load_rows(&path) {
        Ok((rows, report)) => {
            println!(
                "Processing dataset... ({} rows loaded from {})",
                util::format_int(report.total_rows),
                path
            );
            if report.parse_errors > 0 {
                println!(
                    "Note: {} rows skipped due to parse errors.",
                    util::format_int(report.parse_errors)
                );
            }
            println!();
            let mut state = APP_STATE.lock().unwrap();
            state.rows = Some(rows);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: build the aggregate report, preview it and export it.
fn handle_build_report() {
    let rows = {
        let state = APP_STATE.lock().unwrap();
        state.rows.clone()
    };
    let Some(rows) = rows else {
        println!("Error: No data loaded. Please load the data file first (option 1).\n");
        return;
    };

    println!("Building employee statistics...\n");
    let opts = BuildOptions {
        overrides: FieldOverrides::from_env(),
        ..BuildOptions::default()
    };
    let stats = build_stats(&rows, &opts);

    let s = &stats.summary;
    println!(
        "Summary: {} employees ({} male, {} female)",
        util::format_int(s.total_employees),
        util::format_int(s.male_employees),
        util::format_int(s.female_employees)
    );
    println!(
        "Status: PNS {}  CPNS {}  PPPK {}  PPnPN {}  KI {}\n",
        s.status_counts.pns,
        s.status_counts.cpns,
        s.status_counts.pppk,
        s.status_counts.ppnpn,
        s.status_counts.ki
    );

    println!("Age x Status");
    output::preview_table_rows(&stats.age_data, 4);
    println!("Education x Status");
    output::preview_table_rows(&stats.education_data, 5);
    println!("Position x Gender");
    output::preview_table_rows(&stats.position_data, 5);
    println!("Department x Gender");
    output::preview_table_rows(&stats.department_data, 8);
    println!("Gender x Age");
    output::preview_table_rows(&stats.gender_age_data, 4);

    if let Err(e) = output::export_stats(&stats) {
        eprintln!("Write error: {}", e);
    }
    println!("(Full report exported to {})\n", output::EXPORT_FILES.join(", "));
}

fn main() {
    loop {
        println!("Employee Statistics Report");
        println!("[1] Load the data file");
        println!("[2] Build the report\n");
        match read_choice().as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                println!();
                handle_build_report();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
