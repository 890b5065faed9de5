//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = eventpass_cli::run() {
        eprintln!("eventpass: {err}");
        std::process::exit(1);
    }
}
