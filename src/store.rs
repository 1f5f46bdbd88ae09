use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::{fs, io::AsyncWriteExt};

use crate::model::{BoundingBox, Observation};
use crate::Result;

const RESULTS_DIR: &str = "results";

/// Reads the coordinate CSV: a header row, then one `north,west,south,east`
/// row per bounding box. Blank lines are ignored; a malformed row fails the
/// whole load.
pub async fn read_coords(path: impl AsRef<Path>) -> Result<Vec<BoundingBox>> {
    let contents = fs::read_to_string(path).await?;
    contents
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Writes the observations to `results/bird_data-YYYYMMDD.csv` and returns
/// the path. The results directory is created if it isn't there yet.
pub async fn write_observations(observations: &[Observation]) -> Result<PathBuf> {
    let path =
        Path::new(RESULTS_DIR).join(format!("bird_data-{}.csv", Local::now().format("%Y%m%d")));
    fs::create_dir_all(RESULTS_DIR).await?;

    let mut contents = String::from("Hotspot_Name,Bird_Name\n");
    for obs in observations {
        contents.push_str(&csv_field(&obs.hotspot));
        contents.push(',');
        contents.push_str(&csv_field(&obs.species));
        contents.push('\n');
    }

    let mut file = fs::File::create(&path).await?;
    file.write_all(contents.as_bytes()).await?;
    Ok(path)
}

/// Quotes a field only when it needs it (comma, quote or newline inside).
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn reads_boxes_and_skips_the_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "north,west,south,east").unwrap();
        writeln!(file, "45.1,-93.5,44.9,-93.1").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "46.0,-94.0,45.5,-93.6").unwrap();
        file.flush().unwrap();

        let boxes = read_coords(file.path()).await.unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].north, 45.1);
        assert_eq!(boxes[1].east, -93.6);
    }

    #[tokio::test]
    async fn a_malformed_row_fails_the_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "north,west,south,east").unwrap();
        writeln!(file, "45.1,-93.5").unwrap();
        file.flush().unwrap();

        assert!(read_coords(file.path()).await.is_err());
    }

    #[test]
    fn plain_fields_pass_through_unquoted() {
        assert_eq!(csv_field("Canada Goose"), "Canada Goose");
    }

    #[test]
    fn fields_with_separators_get_quoted() {
        assert_eq!(csv_field("Park, East Side"), "\"Park, East Side\"");
        assert_eq!(csv_field("The \"Pit\""), "\"The \"\"Pit\"\"\"");
    }
}
