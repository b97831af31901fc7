//! rutilization main entrypoint.

use rutilization::run;
use rutilization::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
