//! Print whether the store settings are visible to this process, without
//! starting the server.
//!
//! ```sh
//!     APP_STORE__BASE_URL=https://xyz.supabase.co cargo run --bin check_env
//! ```

use wakewatch::configuration::EnvReport;

fn main() {
    println!("{}", EnvReport::from_env());
}
