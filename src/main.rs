use anyhow::Context;

fn main() -> anyhow::Result<()> {
    palm_classifier::run().context("palm classifier failed")
}
