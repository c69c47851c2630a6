#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

use anyhow::Result;
use vergen::EmitBuilder;

fn main() -> Result<()> {
    EmitBuilder::builder()
        .build_date()
        .git_describe(true, true, None)
        .emit()?;

    return Ok(());
}
