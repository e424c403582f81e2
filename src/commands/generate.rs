//! Generate the build artifacts

use anyhow::Result;

use crate::generator::Generator;
use crate::Site;

/// Run the generator over the site
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    Generator::new(site).generate()?;

    let duration = start.elapsed();
    tracing::info!("Completed in {:.2}s", duration.as_secs_f64());
    Ok(())
}
