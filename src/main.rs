//! `roadwatch` (rw) - Report road issues to the city.

use roadwatch::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
