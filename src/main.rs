fn main() -> anyhow::Result<()> {
    scenetag::run(std::env::args().skip(1))?;
    Ok(())
}
