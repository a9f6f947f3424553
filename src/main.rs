fn main() {
    #[cfg(feature = "cli")]
    oxihuff::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("oxihuff: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
