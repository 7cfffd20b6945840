fn main() -> eyre::Result<()> {
    wallman::main()
}
