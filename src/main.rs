fn main() {
    labstatus::run()
}
