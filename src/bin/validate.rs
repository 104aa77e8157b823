//! Checks whether a facelet string is a cube that could physically exist,
//! without trying to fix it.

use clap::Parser;
use cube_scan::validate;

#[derive(Parser)]
struct Args {
    facelets: String,
    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let Args { facelets, json } = Args::parse();
    let result = validate(facelets.trim());
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{result}");
    }
    if !result.ok {
        anyhow::bail!("not a valid cube: {}", result.reason);
    }
    Ok(())
}
