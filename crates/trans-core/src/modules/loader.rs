use crate::domain::{
    ParseResult, Provenance, QuantityKind, ScaledMode, Series, TransError, TransResult,
};
use std::fs;
use std::path::{Path, PathBuf};

pub const MIN_TABLE_COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSelection {
    pub x_column: usize,
    pub y_column: usize,
    pub drop_last_row: bool,
}

/// Which table columns hold the plotted quantities for a given provenance.
pub const fn column_selection(scaled: ScaledMode, as_dw: bool) -> ColumnSelection {
    match (scaled, as_dw) {
        (ScaledMode::BurgessTully, true) => ColumnSelection {
            x_column: 2,
            y_column: 3,
            drop_last_row: false,
        },
        (ScaledMode::BurgessTully, false) => ColumnSelection {
            x_column: 0,
            y_column: 1,
            drop_last_row: false,
        },
        (ScaledMode::Unscaled, true) => ColumnSelection {
            x_column: 0,
            y_column: 1,
            drop_last_row: true,
        },
        (ScaledMode::Unscaled, false) => ColumnSelection {
            x_column: 1,
            y_column: 3,
            drop_last_row: true,
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericTable {
    pub header: Option<String>,
    pub column_count: usize,
    pub rows: Vec<Vec<f64>>,
}

impl NumericTable {
    pub fn column(&self, index: usize, row_count: usize) -> Vec<f64> {
        self.rows
            .iter()
            .take(row_count)
            .map(|row| row[index])
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSeries {
    pub source: PathBuf,
    pub provenance: Provenance,
    pub series: Series,
    pub energy_offset: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesLoader {
    quantity: QuantityKind,
    scaled: ScaledMode,
}

impl SeriesLoader {
    pub const fn new(quantity: QuantityKind, scaled: ScaledMode) -> Self {
        Self { quantity, scaled }
    }

    pub fn load(&self, path: &Path) -> TransResult<LoadedSeries> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                TransError::parse(
                    "PARSE.RESULT_FILE_NAME",
                    format!("result file '{}' has no UTF-8 file name", path.display()),
                )
            })?;
        let provenance = provenance_from_file_name(file_name, self.scaled)?;

        let source = fs::read_to_string(path).map_err(|source| {
            TransError::io_system(
                "IO.RESULT_FILE_READ",
                format!("failed to read result file '{}': {}", path.display(), source),
            )
        })?;

        self.load_source(path, &source, provenance)
    }

    pub fn load_source(
        &self,
        path: &Path,
        source: &str,
        provenance: Provenance,
    ) -> TransResult<LoadedSeries> {
        let origin = path.display().to_string();
        let table = parse_numeric_table(source, &origin)?;
        let selection = column_selection(self.scaled, provenance.is_as_dw());

        let row_count = if selection.drop_last_row {
            table.rows.len().saturating_sub(1)
        } else {
            table.rows.len()
        };
        let x = table.column(selection.x_column, row_count);
        let y = table.column(selection.y_column, row_count);
        let mut series = Series::new(x, y)?;

        let energy_offset = if self.applies_header_offset(&provenance) {
            let first_line = source.lines().next().unwrap_or_default();
            let offset = parse_header_offset(first_line, &origin)?;
            series = series.map_x(|energy| energy + offset);
            Some(offset)
        } else {
            None
        };

        Ok(LoadedSeries {
            source: path.to_path_buf(),
            provenance,
            series,
            energy_offset,
        })
    }

    fn applies_header_offset(&self, provenance: &Provenance) -> bool {
        !self.scaled.is_scaled() && self.quantity == QuantityKind::Omega && provenance.is_as_dw()
    }
}

/// Third `-` field of `{prefix}-{lower}_{upper}-{provenance}.{ext}`, without
/// the extension.
pub fn provenance_from_file_name(file_name: &str, scaled: ScaledMode) -> ParseResult<Provenance> {
    let field = file_name.split('-').nth(2).ok_or_else(|| {
        TransError::parse(
            "PARSE.PROVENANCE",
            format!(
                "result file '{}' does not follow the '<quantity>-<lower>_<upper>-<provenance>' naming",
                file_name
            ),
        )
    })?;

    let extension = format!(".{}", scaled.file_extension());
    let tag = field.strip_suffix(extension.as_str()).unwrap_or(field);
    if tag.is_empty() {
        return Err(TransError::parse(
            "PARSE.PROVENANCE",
            format!("result file '{}' has an empty provenance tag", file_name),
        ));
    }

    Ok(Provenance::from_tag(tag))
}

/// Whitespace-delimited numeric table. The first non-blank line is treated as
/// a header when it starts with `#` or carries an `=`; later `#` lines are
/// comments. Every data row needs the same column count, at least four.
pub fn parse_numeric_table(source: &str, origin: &str) -> ParseResult<NumericTable> {
    let mut header = None;
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut column_count = 0_usize;
    let mut seen_content = false;

    for (line_index, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let first_content = !seen_content;
        seen_content = true;
        if first_content && (trimmed.starts_with('#') || trimmed.contains('=')) {
            header = Some(trimmed.to_string());
            continue;
        }
        if trimmed.starts_with('#') {
            continue;
        }

        let line_number = line_index + 1;
        let row = trimmed
            .split_whitespace()
            .map(|token| {
                parse_numeric_token(token).ok_or_else(|| {
                    TransError::parse(
                        "PARSE.TABLE_ROW",
                        format!(
                            "'{}' line {}: token '{}' is not a number",
                            origin, line_number, token
                        ),
                    )
                })
            })
            .collect::<ParseResult<Vec<_>>>()?;

        if rows.is_empty() {
            if row.len() < MIN_TABLE_COLUMNS {
                return Err(TransError::parse(
                    "PARSE.TABLE_COLUMNS",
                    format!(
                        "'{}' line {}: expected at least {} columns, got {}",
                        origin,
                        line_number,
                        MIN_TABLE_COLUMNS,
                        row.len()
                    ),
                ));
            }
            column_count = row.len();
        } else if row.len() != column_count {
            return Err(TransError::parse(
                "PARSE.TABLE_COLUMNS",
                format!(
                    "'{}' line {}: expected {} columns, got {}",
                    origin,
                    line_number,
                    column_count,
                    row.len()
                ),
            ));
        }

        rows.push(row);
    }

    if rows.is_empty() {
        return Err(TransError::parse(
            "PARSE.TABLE_EMPTY",
            format!("'{}' does not contain any numeric rows", origin),
        ));
    }

    Ok(NumericTable {
        header,
        column_count,
        rows,
    })
}

/// Energy offset carried in a header such as `Threshold = 1.5 Ryd`: the text
/// after the first `=` (up to any further `=`), reduced to ASCII digits and `.`.
pub fn parse_header_offset(header_line: &str, origin: &str) -> ParseResult<f64> {
    let value_text = header_line.split('=').nth(1).ok_or_else(|| {
        TransError::parse(
            "PARSE.HEADER_OFFSET",
            format!(
                "'{}' header '{}' does not contain an '=' energy offset",
                origin,
                header_line.trim()
            ),
        )
    })?;

    let digits = value_text
        .chars()
        .filter(|character| character.is_ascii_digit() || *character == '.')
        .collect::<String>();

    digits.parse::<f64>().map_err(|_| {
        TransError::parse(
            "PARSE.HEADER_OFFSET",
            format!(
                "'{}' header offset '{}' is not a number",
                origin,
                value_text.trim()
            ),
        )
    })
}

fn parse_numeric_token(token: &str) -> Option<f64> {
    let normalized = token.replace(['D', 'd'], "E");
    normalized.parse::<f64>().ok()
}
