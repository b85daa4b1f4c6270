//! Plain-text curves in and the dispatch result out.

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use csv::{Position, ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::de::DeserializeOwned;

use crate::{core::step::Step, prelude::*};

const HEADER: [&str; 5] = ["index", "residual_load", "adjusted_load", "charge", "soc"];

/// Read a curve with one value per line.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_curve<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    let curve = parse_curve(file).with_context(|| format!("failed to read `{}`", path.display()))?;
    info!(len = curve.len(), "loaded");
    Ok(curve)
}

fn parse_curve<T: DeserializeOwned>(reader: impl Read) -> Result<Vec<T>> {
    ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(reader)
        .into_records()
        .map(|record| -> Result<T> {
            let record: StringRecord = record?;
            let line = record.position().map_or(0, Position::line);
            let (value,) = record
                .deserialize::<(T,)>(None)
                .with_context(|| format!("invalid value at line {line}"))?;
            Ok(value)
        })
        .collect()
}

/// Write the hour-by-hour schedule as CSV, adding the price column when the prices are known.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn write_schedule(path: &Path, steps: &[Step]) -> Result {
    let file =
        File::create(path).with_context(|| format!("failed to create `{}`", path.display()))?;
    serialize_schedule(BufWriter::new(file), steps)
        .with_context(|| format!("failed to write `{}`", path.display()))?;
    info!(n_rows = steps.len(), "saved");
    Ok(())
}

fn serialize_schedule(writer: impl Write, steps: &[Step]) -> Result {
    let with_prices = steps.iter().any(|step| step.price.is_some());
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    if with_prices {
        writer.write_record(HEADER.iter().chain(&["price"]))?;
    } else {
        writer.write_record(HEADER)?;
    }
    for step in steps {
        let (index, residual_load, adjusted_load, charge, soc) = (
            step.index,
            step.residual_load,
            step.adjusted_load,
            step.charge,
            step.state_of_charge,
        );
        if with_prices {
            writer.serialize((index, residual_load, adjusted_load, charge, soc, step.price))?;
        } else {
            writer.serialize((index, residual_load, adjusted_load, charge, soc))?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::{energy::MegawattHours, power::Megawatts, rate::MegawattHourRate};

    #[test]
    fn test_parse_curve() -> Result {
        let curve: Vec<Megawatts> = parse_curve(" 100\n250.5 \n\n-3e1\n".as_bytes())?;
        assert_eq!(curve, vec![Megawatts::from(100.0), Megawatts::from(250.5), Megawatts::from(-30.0)]);
        Ok(())
    }

    #[test]
    fn test_parse_curve_reports_line() {
        let error = parse_curve::<Megawatts>("1\n2\nthree\n".as_bytes()).unwrap_err();
        assert!(format!("{error:#}").contains("line 3"), "{error:#}");
    }

    fn steps(price: Option<f64>) -> Vec<Step> {
        vec![
            Step {
                index: 0,
                residual_load: Megawatts::from(100.0),
                adjusted_load: Megawatts::from(150.0),
                charge: Megawatts::from(50.0),
                state_of_charge: MegawattHours::from(50.0),
                price: price.map(MegawattHourRate::from),
            },
            Step {
                index: 1,
                residual_load: Megawatts::from(500.0),
                adjusted_load: Megawatts::from(450.0),
                charge: Megawatts::from(-50.0),
                state_of_charge: MegawattHours::ZERO,
                price: price.map(|price| MegawattHourRate::from(price * 2.0)),
            },
        ]
    }

    #[test]
    fn test_serialize_schedule() -> Result {
        let mut buffer = Vec::new();
        serialize_schedule(&mut buffer, &steps(None))?;
        assert_eq!(
            String::from_utf8(buffer)?,
            "index,residual_load,adjusted_load,charge,soc\n\
             0,100.0,150.0,50.0,50.0\n\
             1,500.0,450.0,-50.0,0.0\n",
        );
        Ok(())
    }

    #[test]
    fn test_serialize_schedule_with_prices() -> Result {
        let mut buffer = Vec::new();
        serialize_schedule(&mut buffer, &steps(Some(12.5)))?;
        let output = String::from_utf8(buffer)?;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "index,residual_load,adjusted_load,charge,soc,price");
        assert_eq!(lines[1], "0,100.0,150.0,50.0,50.0,12.5");
        assert_eq!(lines[2], "1,500.0,450.0,-50.0,0.0,25.0");
        Ok(())
    }
}
