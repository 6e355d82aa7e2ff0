fn main() {
    sutra_corpus::cli::run();
}
