fn main() {
    dothings::run();
}
