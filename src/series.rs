use std::io::Read;
use std::path::Path;

use anyhow::Context;

use crate::models::RawClimateSeries;

#[derive(serde::Deserialize)]
struct CsvRow {
    date: String,
    temperature: Option<f64>,
    precipitation: Option<f64>,
}

/// Load a series from `.csv` (date,temperature,precipitation) or JSON.
pub fn load_series(path: &Path) -> anyhow::Result<RawClimateSeries> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open series file {}", path.display()))?;

    if is_csv {
        read_csv(file).with_context(|| format!("failed to parse CSV series {}", path.display()))
    } else {
        read_json(file).with_context(|| format!("failed to parse JSON series {}", path.display()))
    }
}

pub fn read_csv<R: Read>(source: R) -> anyhow::Result<RawClimateSeries> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);
    let mut series = RawClimateSeries {
        dates: Vec::new(),
        temperatures: Vec::new(),
        precipitation: Vec::new(),
    };

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        series.dates.push(row.date);
        series.temperatures.push(row.temperature);
        series.precipitation.push(row.precipitation);
    }

    Ok(series)
}

pub fn read_json<R: Read>(source: R) -> anyhow::Result<RawClimateSeries> {
    Ok(serde_json::from_reader(source)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn csv_blank_cells_load_as_missing() {
        let data = "date,temperature,precipitation\n\
                    1990-01-01,20.5,3.2\n\
                    1990-01-02,,1.0\n\
                    1990-01-03,21.0,\n";
        let series = read_csv(data.as_bytes()).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.temperatures, vec![Some(20.5), None, Some(21.0)]);
        assert_eq!(series.precipitation, vec![Some(3.2), Some(1.0), None]);
    }

    #[test]
    fn csv_rejects_non_numeric_cells() {
        let data = "date,temperature,precipitation\n1990-01-01,warm,3.2\n";
        assert!(read_csv(data.as_bytes()).is_err());
    }

    #[test]
    fn json_nulls_load_as_missing() {
        let data = r#"{"dates":["1990-01-01","1990-01-02"],"temperatures":[20.0,null],"precipitation":[null,2.5]}"#;
        let series = read_json(data.as_bytes()).unwrap();
        assert_eq!(series.temperatures, vec![Some(20.0), None]);
        assert_eq!(series.precipitation, vec![None, Some(2.5)]);
    }

    #[test]
    fn load_series_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.CSV");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "date,temperature,precipitation").unwrap();
        writeln!(file, "2020-01-01,25.0,4.0").unwrap();
        drop(file);

        let series = load_series(&path).unwrap();
        assert_eq!(series.dates, vec!["2020-01-01".to_string()]);

        let missing = load_series(&dir.path().join("absent.json"));
        assert!(missing.is_err());
    }
}
