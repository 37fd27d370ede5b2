use crate::core::importer::CatalogFormat;
use crate::domain::model::ShippingBox;
use crate::utils::error::{BoxfitError, Result};
use rust_xlsxwriter::Workbook;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

const HEADERS: [&str; 4] = ["Name", "Length", "Width", "Height"];
const SHEET_NAME: &str = "Box Definitions";

fn export_csv(catalog: &[ShippingBox]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;
    for shipping_box in catalog {
        let [length, width, height] = shipping_box.dimensions;
        writer.write_record([
            shipping_box.name.clone(),
            length.to_string(),
            width.to_string(),
            height.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| BoxfitError::IoError(e.into_error()))
}

fn export_xlsx(catalog: &[ShippingBox]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (index, shipping_box) in catalog.iter().enumerate() {
        let row = (index + 1) as u32;
        worksheet.write_string(row, 0, &shipping_box.name)?;
        for (offset, dimension) in shipping_box.dimensions.iter().enumerate() {
            worksheet.write_number(row, (offset + 1) as u16, *dimension)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

pub fn export_catalog(format: CatalogFormat, catalog: &[ShippingBox]) -> Result<Vec<u8>> {
    let payload = match format {
        CatalogFormat::Json => serde_json::to_vec_pretty(catalog)?,
        CatalogFormat::Csv => export_csv(catalog)?,
        CatalogFormat::Xlsx => export_xlsx(catalog)?,
    };

    tracing::debug!(
        "Exported {} boxes as {} ({} bytes)",
        catalog.len(),
        format,
        payload.len()
    );
    Ok(payload)
}

/// 三種格式一起打包成 zip
pub fn export_bundle(catalog: &[ShippingBox]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for format in CatalogFormat::ALL {
        let payload = export_catalog(format, catalog)?;
        zip.start_file::<_, ()>(format.default_file_name(), FileOptions::default())?;
        zip.write_all(&payload)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
