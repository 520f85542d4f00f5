use crate::classifier::FormatFamily;
use crate::error::ExtractionError;
use crate::extractor::Extractor;
use calamine::{open_workbook_auto_from_rs, Reader};
use std::io::Cursor;
use tracing::debug;

/// Spreadsheets (xls, xlsx, xlsm, ods) through calamine.
/// Every sheet becomes tab-separated rows; sheets are separated by a blank line.
pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpreadsheetExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for SpreadsheetExtractor {
    fn family(&self) -> FormatFamily {
        FormatFamily::Spreadsheet
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| ExtractionError::parse("spreadsheet", e))?;

        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
        let mut sheets = Vec::with_capacity(sheet_names.len());

        for sheet_name in &sheet_names {
            let range = workbook
                .worksheet_range(sheet_name)
                .map_err(|e| ExtractionError::parse("spreadsheet", format!("sheet {sheet_name}: {e}")))?;

            let mut writer = csv::WriterBuilder::new()
                .delimiter(b'\t')
                .quote_style(csv::QuoteStyle::Never)
                .has_headers(false)
                .flexible(true)
                .from_writer(Vec::new());

            for row in range.rows() {
                writer
                    .write_record(row.iter().map(|cell| cell.to_string()))
                    .map_err(|e| ExtractionError::parse("spreadsheet", e))?;
            }

            let rendered = writer
                .into_inner()
                .map_err(|e| ExtractionError::parse("spreadsheet", e))?;
            debug!("Sheet {} rendered to {} bytes", sheet_name, rendered.len());
            sheets.push(String::from_utf8_lossy(&rendered).trim_end().to_string());
        }

        Ok(sheets.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "office")]
    use crate::extractor::container::tests::build_zip;

    #[cfg(feature = "office")]
    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

    #[cfg(feature = "office")]
    const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

    #[cfg(feature = "office")]
    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Inventory" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

    #[cfg(feature = "office")]
    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

    #[cfg(feature = "office")]
    const SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>Item</t></is></c><c r="B1" t="inlineStr"><is><t>Count</t></is></c></row><row r="2"><c r="A2" t="inlineStr"><is><t>Widget</t></is></c><c r="B2"><v>42</v></c></row></sheetData></worksheet>"#;

    #[cfg(feature = "office")]
    #[test]
    fn test_xlsx_rows_are_tab_separated() {
        let bytes = build_zip(&[
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", ROOT_RELS),
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
            ("xl/worksheets/sheet1.xml", SHEET),
        ]);

        let text = SpreadsheetExtractor::new().extract(&bytes).unwrap();
        assert!(text.contains("Item\tCount"));
        assert!(text.contains("Widget\t42"));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result = SpreadsheetExtractor::new().extract(b"name,count\nwidget,1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_family() {
        assert_eq!(SpreadsheetExtractor::new().family(), FormatFamily::Spreadsheet);
    }
}
