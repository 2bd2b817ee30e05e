//! Waits for one SIGINT, then reports the signal that was caught.

fn main() {
    if let Err(code) = forkexec::cli::run_pause_signal() {
        std::process::exit(code.as_i32());
    }
}
