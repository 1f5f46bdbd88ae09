use birdscrap::{info_time, process::Pipeline, store, Result};
use chrono::Local;

const DEFAULT_COORD_FILE: &str = "rsc/coordList.csv";
const DEFAULT_CUTOFF_YEAR: i32 = 2010;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let coord_file = args.next().unwrap_or_else(|| DEFAULT_COORD_FILE.into());
    let cutoff_year = args
        .next()
        .and_then(|year| year.parse().ok())
        .unwrap_or(DEFAULT_CUTOFF_YEAR);

    let start_time = Local::now();
    let boxes = store::read_coords(&coord_file).await?;
    let observations = Pipeline::new().run(&boxes, cutoff_year).await;
    let path = store::write_observations(&observations).await?;
    info_time!(
        start_time,
        "Wrote {} rows to {}",
        observations.len(),
        path.display()
    );

    Ok(())
}
