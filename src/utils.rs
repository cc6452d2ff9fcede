pub fn write_csv<I, R, W>(records: I, writer: W) -> anyhow::Result<usize>
where
    I: IntoIterator<Item = R>,
    R: serde::Serialize,
    W: std::io::Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    let mut count = 0;
    for record in records.into_iter() {
        wtr.serialize(record)?;
        count += 1;
    }
    wtr.flush()?;
    Ok(count)
}

pub fn read_csv<T, R>(reader: R) -> anyhow::Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
    R: std::io::Read,
{
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let record: T =
            result.map_err(|e| anyhow::anyhow!("row {}: {}", i + 1, e))?;
        records.push(record);
    }
    Ok(records)
}
