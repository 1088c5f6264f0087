mod logging;
mod render;
mod runner;

fn main() -> std::io::Result<()> {
    logging::initialize(logging::LogDestination::File);
    let streaming = !std::env::args().any(|arg| arg == "--batch");
    runner::run(streaming)
}
