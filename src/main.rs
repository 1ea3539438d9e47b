fn main() {
    category_tree::cli::run();
}
