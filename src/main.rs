fn main() -> Result<(), eframe::Error> {
    torrid::run_app()
}
