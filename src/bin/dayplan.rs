use anyhow::Result;

fn main() -> Result<()> {
    dayplan::cli::run()
}
