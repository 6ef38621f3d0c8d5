fn main() {
    if let Err(err) = proktree::cli::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
