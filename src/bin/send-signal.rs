//! Spawns a child that catches the demo signals, then sends the child a signal.

fn main() {
    if let Err(code) = forkexec::cli::run_send_signal() {
        std::process::exit(code.as_i32());
    }
}
