use anyhow::Result;
use oxi2medview::cli;
use oxi2medview::InputFormat;

fn main() -> Result<()> {
    cli::run("oxi2medview", InputFormat::Emay)
}
