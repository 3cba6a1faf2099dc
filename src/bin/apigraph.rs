fn main() {
    if let Err(err) = apigraph_exporter::cli::run_cli() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
