fn main() {
    ae::cli::run();
}
