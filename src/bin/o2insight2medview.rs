//! Invocation alias that assumes O2 Insight Pro input when no format is
//! given on the command line or in `CSV_FORMAT`.

use anyhow::Result;
use oxi2medview::cli;
use oxi2medview::InputFormat;

fn main() -> Result<()> {
    cli::run("o2insight2medview", InputFormat::O2Insight)
}
