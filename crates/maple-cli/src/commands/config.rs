//! Config inspection command

use anyhow::Result;

pub fn run(path: Option<&str>) -> Result<()> {
    let config = super::load_config(path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
